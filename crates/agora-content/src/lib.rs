//! Ordered transform pipeline rendering forum posts to HTML.
//!
//! A post is rendered by running its raw text through a list of
//! [`Transform`]s. The standard pipeline is:
//!
//! 1. [`MarkdownTransform`]: markdown to HTML
//! 2. [`VideoEmbedTransform`]: video links to inline players
//! 3. [`CodeClassTransform`]: highlight class on `<pre>` blocks
//!
//! The order matters. Video embedding runs after markdown so the player
//! markup is not escaped, and the `<pre>` rewrite runs last so nothing
//! upstream reinterprets it.
//!
//! # Safety of the output
//!
//! The pipeline does not sanitize HTML. Raw HTML in a post passes through
//! the markdown stage untouched, so output must be sanitized separately
//! before it is served to other users if posts are untrusted.
//!
//! # Example
//!
//! ```
//! use agora_content::{ContentOptions, ContentPipeline};
//!
//! let pipeline = ContentPipeline::standard(&ContentOptions::default()).unwrap();
//! let html = pipeline.render("```\nlet x = 1;\n```");
//!
//! assert_eq!(html, "<pre class=\"prettyprint\"><code>let x = 1;\n</code></pre>\n");
//! ```

mod code_class;
mod markdown;
mod pipeline;
mod video;

pub use code_class::{CodeClassTransform, DEFAULT_CODE_CLASS};
pub use markdown::MarkdownTransform;
pub use pipeline::{ContentOptions, ContentPipeline, PipelineBuilder, Transform};
pub use video::VideoEmbedTransform;

/// Content pipeline error.
///
/// Raised only while building a pipeline: a pipeline that was built renders
/// every post.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A transform could not be configured.
    #[error("Content pipeline configuration error: {0}")]
    Configuration(String),
    /// A transform pattern failed to compile.
    #[error("Invalid pattern in {stage}: {source}")]
    Pattern {
        /// Stage that owns the pattern.
        stage: &'static str,
        /// Regex compile error.
        #[source]
        source: regex::Error,
    },
}
