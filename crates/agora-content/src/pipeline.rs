//! Transform trait and the ordered pipeline.

use crate::ContentError;
use crate::code_class::{CodeClassTransform, DEFAULT_CODE_CLASS};
use crate::markdown::MarkdownTransform;
use crate::video::VideoEmbedTransform;

/// A total, side-effect-free text transform.
pub trait Transform: Send + Sync {
    /// Stage name, used in logs and [`ContentPipeline::stage_names`].
    fn name(&self) -> &'static str;

    /// Transform `input` into a new string.
    fn apply(&self, input: &str) -> String;
}

/// Settings for [`ContentPipeline::standard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentOptions {
    /// Class added to `<pre>` tags.
    pub code_class: String,
    /// Replace video links with inline players.
    pub video_embeds: bool,
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            code_class: DEFAULT_CODE_CLASS.to_owned(),
            video_embeds: true,
            gfm: true,
        }
    }
}

/// Ordered list of transforms applied to every post.
pub struct ContentPipeline {
    stages: Vec<Box<dyn Transform>>,
}

impl ContentPipeline {
    /// Start building a custom pipeline.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder { stages: Vec::new() }
    }

    /// Markdown, then video embeds (if enabled), then `<pre>` classes.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if a stage cannot be configured (e.g., an
    /// invalid code class).
    pub fn standard(options: &ContentOptions) -> Result<Self, ContentError> {
        let mut builder =
            Self::builder().stage(MarkdownTransform::new().with_gfm(options.gfm));
        if options.video_embeds {
            builder = builder.stage(VideoEmbedTransform::new()?);
        }
        builder
            .stage(CodeClassTransform::new(&options.code_class)?)
            .build()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Render a post.
    ///
    /// Empty or whitespace-only input is returned unchanged.
    pub fn render(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return raw.to_owned();
        }

        let mut content = raw.to_owned();
        for stage in &self.stages {
            content = stage.apply(&content);
        }

        tracing::trace!(
            input_len = raw.len(),
            output_len = content.len(),
            "Rendered post"
        );
        content
    }
}

/// Builder for [`ContentPipeline`].
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Transform>>,
}

impl PipelineBuilder {
    /// Append a stage; stages run in the order they are added.
    #[must_use]
    pub fn stage<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.stages.push(Box::new(transform));
        self
    }

    /// Finish the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Configuration`] if no stage was added.
    pub fn build(self) -> Result<ContentPipeline, ContentError> {
        if self.stages.is_empty() {
            return Err(ContentError::Configuration(
                "pipeline has no stages".to_owned(),
            ));
        }
        Ok(ContentPipeline {
            stages: self.stages,
        })
    }
}
