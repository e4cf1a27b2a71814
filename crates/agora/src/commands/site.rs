//! `agora themes`, `rss`, `badge`, `ping` and `static` command implementations.

use std::path::{Path, PathBuf};

use agora_config::{CliSettings, Config};
use agora_site::{
    badge_url, category_rss_url, file_is_image, is_static_resource, ping, theme_folders,
};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the themes command.
#[derive(Args)]
pub(crate) struct ThemesArgs {
    /// Theme root directory (overrides config).
    #[arg(long)]
    theme_root: Option<PathBuf>,
}

impl ThemesArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            theme_root: self.theme_root,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let root = &config.site_resolved.theme_root;

        output.info(&format!("Theme root: {}", root.display()));
        let themes = theme_folders(root)?;
        if themes.is_empty() {
            output.warning(&format!("No themes installed in {}", root.display()));
        }
        for theme in &themes {
            output.result(theme);
        }
        Ok(())
    }
}

/// Arguments for the rss command.
#[derive(Args)]
pub(crate) struct RssArgs {
    /// Category slug.
    slug: String,
}

impl RssArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let config = Config::load(config_path, None)?;
        Output::new().result(&rss_url(&config, &self.slug));
        Ok(())
    }
}

/// Arguments for the badge command.
#[derive(Args)]
pub(crate) struct BadgeArgs {
    /// Badge image file name.
    file: String,
}

impl BadgeArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let config = Config::load(config_path, None)?;
        Output::new().result(&badge_image_url(&config, &self.file));
        Ok(())
    }
}

fn rss_url(config: &Config, slug: &str) -> String {
    category_rss_url(&config.site_resolved.category_url_identifier, slug)
}

fn badge_image_url(config: &Config, file: &str) -> String {
    badge_url(&config.site_resolved.badge_root, file)
}

/// Arguments for the ping command.
#[derive(Args)]
pub(crate) struct PingArgs {
    /// URL to probe with a HEAD request.
    url: String,
}

impl PingArgs {
    pub(crate) fn execute(self) {
        let output = Output::new();
        if ping(&self.url) {
            output.success(&format!("{} is up", self.url));
        } else {
            output.warning(&format!("{} is unreachable", self.url));
        }
    }
}

/// Arguments for the static command.
#[derive(Args)]
pub(crate) struct StaticArgs {
    /// Request path, e.g. `/themes/metro/style.css`.
    path: String,
}

impl StaticArgs {
    pub(crate) fn execute(self) {
        let output = Output::new();
        let path = self.path.split(['?', '#']).next().unwrap_or_default();

        let kind = if !is_static_resource(path) {
            "dynamic"
        } else if file_is_image(path) {
            "static image"
        } else {
            "static"
        };
        output.result(&format!("{path}: {kind}"));
    }
}
