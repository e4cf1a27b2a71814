//! Video link to inline player stage.
//!
//! Runs on HTML. A provider URL is replaced when it stands on its own in
//! text (start of line, after whitespace or right after a tag) or when it is
//! the target of an autolinked `<a>`. URLs inside attribute values, `<pre>`
//! and `<code>` are left alone, which also keeps the stage idempotent: the
//! player markup it emits only contains URLs inside attributes.

use regex::{Captures, Regex};

use crate::ContentError;
use crate::pipeline::Transform;

/// Trailing URL characters swallowed with a match (query rest, fragment).
const URL_TAIL: &str = r#"[^\s"<]*"#;

struct Provider {
    name: &'static str,
    /// URL pattern with a named `id` group.
    url: &'static str,
    embed: fn(&str) -> String,
}

const PROVIDERS: &[Provider] = &[
    Provider {
        name: "youtube",
        url: r#"https?://(?:www\.|m\.)?(?:youtube\.com/watch\?(?:[^\s"<]*?&(?:amp;)?)?v=|youtu\.be/)(?P<id>[\w-]{11})"#,
        embed: youtube_player,
    },
    Provider {
        name: "vimeo",
        url: r#"https?://(?:www\.)?vimeo\.com/(?:[^\s"<]*/videos/)?(?P<id>\d+)"#,
        embed: vimeo_player,
    },
    Provider {
        name: "instagram",
        url: r"https?://(?:www\.)?instagr(?:\.am|am\.com)/p/(?P<id>[\w-]+)",
        embed: instagram_player,
    },
];

fn youtube_player(id: &str) -> String {
    format!(
        r#"<div class="video-container"><iframe title="YouTube video player" width="500" height="281" src="https://www.youtube.com/embed/{id}" frameborder="0" allowfullscreen></iframe></div>"#
    )
}

fn vimeo_player(id: &str) -> String {
    format!(
        r#"<div class="video-container"><iframe src="https://player.vimeo.com/video/{id}?portrait=0" width="500" height="281" frameborder="0" allowfullscreen></iframe></div>"#
    )
}

fn instagram_player(id: &str) -> String {
    format!(
        r#"<div class="video-container"><iframe src="https://www.instagram.com/p/{id}/embed" width="400" height="480" frameborder="0" scrolling="no"></iframe></div>"#
    )
}

struct EmbedRule {
    name: &'static str,
    anchor: Regex,
    bare: Regex,
    embed: fn(&str) -> String,
}

/// Replaces YouTube, Vimeo and Instagram links with inline players.
pub struct VideoEmbedTransform {
    rules: Vec<EmbedRule>,
    protected: Regex,
}

impl VideoEmbedTransform {
    /// Compile the provider patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, ContentError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| ContentError::Pattern {
                stage: "video-embed",
                source,
            })
        };

        let rules = PROVIDERS
            .iter()
            .map(|p| {
                Ok(EmbedRule {
                    name: p.name,
                    anchor: compile(&format!(r#"<a href="{}{URL_TAIL}"[^>]*>[^<]*</a>"#, p.url))?,
                    bare: compile(&format!(r"(?m)(?P<lead>^|[\s>]){}{URL_TAIL}", p.url))?,
                    embed: p.embed,
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;

        Ok(Self {
            rules,
            protected: compile(r"(?s)<pre[\s>].*?</pre>|<code[\s>].*?</code>")?,
        })
    }

    fn embed_text(&self, text: &str) -> String {
        let mut text = text.to_owned();
        for rule in &self.rules {
            if !rule.bare.is_match(&text) && !rule.anchor.is_match(&text) {
                continue;
            }
            tracing::trace!(provider = rule.name, "Embedding video");
            text = rule
                .anchor
                .replace_all(&text, |caps: &Captures| (rule.embed)(&caps["id"]))
                .into_owned();
            text = rule
                .bare
                .replace_all(&text, |caps: &Captures| {
                    format!("{}{}", &caps["lead"], (rule.embed)(&caps["id"]))
                })
                .into_owned();
        }
        text
    }
}

impl Transform for VideoEmbedTransform {
    fn name(&self) -> &'static str {
        "video-embed"
    }

    fn apply(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut last = 0;
        for span in self.protected.find_iter(input) {
            output.push_str(&self.embed_text(&input[last..span.start()]));
            output.push_str(span.as_str());
            last = span.end();
        }
        output.push_str(&self.embed_text(&input[last..]));
        output
    }
}
