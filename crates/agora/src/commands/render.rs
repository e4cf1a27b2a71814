//! `agora render` command implementation.

use std::path::{Path, PathBuf};

use agora_config::{CliSettings, Config};
use agora_content::{ContentOptions, ContentPipeline};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file holding the post body.
    file: PathBuf,

    /// Class added to `<pre>` blocks (overrides config).
    #[arg(long)]
    code_class: Option<String>,

    /// Keep video links as plain links.
    #[arg(long)]
    no_video_embeds: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            code_class: self.code_class,
            video_embeds: self.no_video_embeds.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let pipeline = content_pipeline(&config)?;
        tracing::info!(stages = ?pipeline.stage_names(), "Built content pipeline");

        let raw = std::fs::read_to_string(&self.file)?;
        output.result(pipeline.render(&raw).trim_end());
        Ok(())
    }
}

/// Rendering pipeline described by the `[content]` section.
fn content_pipeline(config: &Config) -> Result<ContentPipeline, CliError> {
    Ok(ContentPipeline::standard(&ContentOptions {
        code_class: config.content.code_class.clone(),
        video_embeds: config.content.video_embeds,
        gfm: config.content.gfm,
    })?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_pipeline_uses_configured_code_class() {
        let mut config = Config::default();
        config.content.code_class = "hljs".to_owned();

        let html = content_pipeline(&config).unwrap().render("```\nx\n```");

        assert_eq!(html, "<pre class=\"hljs\"><code>x\n</code></pre>\n");
    }

    #[test]
    fn test_pipeline_rejects_unsafe_code_class() {
        let mut config = Config::default();
        config.content.code_class = "x\" onload=\"y".to_owned();
        config.validate().unwrap();

        let err = content_pipeline(&config).err().unwrap();

        assert!(matches!(err, CliError::Content(_)), "{err}");
    }
}
