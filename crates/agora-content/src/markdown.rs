//! Markdown to HTML stage.

use pulldown_cmark::{Options, Parser, html};

use crate::pipeline::Transform;

/// Converts markdown to HTML with pulldown-cmark.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownTransform {
    gfm: bool,
}

impl Default for MarkdownTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownTransform {
    /// Create a markdown stage with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl Transform for MarkdownTransform {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn apply(&self, input: &str) -> String {
        let parser = Parser::new_ext(input, self.parser_options());
        let mut output = String::with_capacity(input.len() + input.len() / 2);
        html::push_html(&mut output, parser);
        output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_and_emphasis() {
        let html = MarkdownTransform::new().apply("# Title\n\n*hi*");

        assert_eq!(html, "<h1>Title</h1>\n<p><em>hi</em></p>\n");
    }

    #[test]
    fn test_strikethrough_requires_gfm() {
        let with_gfm = MarkdownTransform::new().apply("~~old~~");
        let without_gfm = MarkdownTransform::new().with_gfm(false).apply("~~old~~");

        assert_eq!(with_gfm, "<p><del>old</del></p>\n");
        assert_eq!(without_gfm, "<p>~~old~~</p>\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = MarkdownTransform::new().apply("a < b & c");

        assert_eq!(html, "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_plain_code_block() {
        let html = MarkdownTransform::new().apply("    indented\n");

        assert_eq!(html, "<pre><code>indented\n</code></pre>\n");
    }
}
