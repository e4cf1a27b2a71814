//! `agora avatar` and `agora category-image` command implementations.

use std::path::Path;
use std::sync::Arc;

use agora_config::{CliSettings, Config};
use agora_storage::ImageRequest;
use clap::Args;
use uuid::Uuid;

use super::{disk_storage, image_resolver};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the avatar command.
#[derive(Args)]
pub(crate) struct AvatarArgs {
    /// Name the avatar upload was stored under.
    #[arg(long)]
    file: Option<String>,

    /// Member email address, used for the Gravatar fallback.
    #[arg(long)]
    email: String,

    /// Member id.
    #[arg(long)]
    owner: Uuid,

    /// Square size in pixels.
    #[arg(long, default_value_t = 50)]
    size: u32,

    /// Public uploads path (overrides config).
    #[arg(long)]
    upload_url: Option<String>,
}

impl AvatarArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let config = load_config(config_path, self.upload_url)?;
        let resolver = image_resolver(&config, Arc::new(disk_storage(&config)?));

        let request = ImageRequest::new(self.owner, self.file, self.size);
        let url = resolver.avatar_url_for(&request, &self.email)?;

        Output::new().result(&url);
        Ok(())
    }
}

/// Arguments for the category-image command.
#[derive(Args)]
pub(crate) struct CategoryImageArgs {
    /// Name the category image was stored under.
    #[arg(long)]
    file: Option<String>,

    /// Category id.
    #[arg(long)]
    owner: Uuid,

    /// Square size in pixels.
    #[arg(long, default_value_t = 50)]
    size: u32,

    /// Public uploads path (overrides config).
    #[arg(long)]
    upload_url: Option<String>,
}

impl CategoryImageArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(config_path, self.upload_url)?;
        let resolver = image_resolver(&config, Arc::new(disk_storage(&config)?));

        let request = ImageRequest::new(self.owner, self.file, self.size);
        match resolver.category_image_url_for(&request)? {
            Some(url) => output.result(&url),
            None => output.warning("No category image (set images.default_category_image)"),
        }
        Ok(())
    }
}

fn load_config(config_path: Option<&Path>, upload_url: Option<String>) -> Result<Config, CliError> {
    let cli_settings = CliSettings {
        upload_url,
        ..CliSettings::default()
    };
    Ok(Config::load(config_path, Some(&cli_settings))?)
}
