//! `<pre>` class injection stage.

use crate::ContentError;
use crate::pipeline::Transform;

/// Class understood by Google Code Prettify.
pub const DEFAULT_CODE_CLASS: &str = "prettyprint";

/// Adds a presentation class to every bare `<pre>` tag.
///
/// Only the literal `<pre>` tag is rewritten. A `<pre>` that already carries
/// attributes is left as is, so rendering already-rendered HTML does not
/// add the class twice.
#[derive(Debug, Clone)]
pub struct CodeClassTransform {
    tag: String,
}

impl Default for CodeClassTransform {
    fn default() -> Self {
        Self {
            tag: pre_tag(DEFAULT_CODE_CLASS),
        }
    }
}

impl CodeClassTransform {
    /// Create a stage adding `class` to `<pre>` tags.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Configuration`] if `class` is empty or contains
    /// characters other than ASCII letters, digits, `-`, `_` and spaces.
    pub fn new(class: &str) -> Result<Self, ContentError> {
        let valid = !class.trim().is_empty()
            && class
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '));
        if !valid {
            return Err(ContentError::Configuration(format!(
                "invalid code block class {class:?}"
            )));
        }
        Ok(Self {
            tag: pre_tag(class.trim()),
        })
    }
}

fn pre_tag(class: &str) -> String {
    format!(r#"<pre class="{class}">"#)
}

impl Transform for CodeClassTransform {
    fn name(&self) -> &'static str {
        "code-class"
    }

    fn apply(&self, input: &str) -> String {
        input.replace("<pre>", &self.tag)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_every_pre_annotated() {
        let html = CodeClassTransform::default().apply("<pre><code>a</code></pre><pre>b</pre>");

        assert_eq!(
            html,
            r#"<pre class="prettyprint"><code>a</code></pre><pre class="prettyprint">b</pre>"#
        );
    }

    #[test]
    fn test_already_annotated_untouched() {
        let stage = CodeClassTransform::default();
        let once = stage.apply("<pre><code>x</code></pre>");

        assert_eq!(stage.apply(&once), once);
    }

    #[test]
    fn test_pre_with_other_attributes_untouched() {
        let input = r#"<pre data-lang="sql">select 1</pre>"#;

        assert_eq!(CodeClassTransform::default().apply(input), input);
    }

    #[test]
    fn test_custom_class() {
        let stage = CodeClassTransform::new("hljs line-numbers").unwrap();

        assert_eq!(stage.apply("<pre>x</pre>"), r#"<pre class="hljs line-numbers">x</pre>"#);
    }

    #[test]
    fn test_invalid_class() {
        assert!(CodeClassTransform::new("").is_err());
        assert!(CodeClassTransform::new("   ").is_err());
        assert!(CodeClassTransform::new("x\" onclick=\"y").is_err());
        assert!(CodeClassTransform::new("<b>").is_err());
    }
}
