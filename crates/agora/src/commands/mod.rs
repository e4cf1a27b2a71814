//! CLI command implementations.

mod images;
mod links;
mod render;
mod site;

use std::sync::Arc;

use agora_config::Config;
use agora_storage::{DiskStorage, GravatarOptions, ImageUrlResolver, StorageBackend};

use crate::error::CliError;

pub(crate) use images::{AvatarArgs, CategoryImageArgs};
pub(crate) use links::LinksArgs;
pub(crate) use render::RenderArgs;
pub(crate) use site::{BadgeArgs, PingArgs, RssArgs, StaticArgs, ThemesArgs};

/// Upload storage described by the `[storage]` section.
fn disk_storage(config: &Config) -> Result<DiskStorage, CliError> {
    let storage = DiskStorage::new(config.storage.upload_url.as_str())?;
    Ok(match &config.storage.base_url {
        Some(base_url) => storage.with_base_url(base_url.as_str()),
        None => storage,
    })
}

/// Image resolver over `storage` configured from the `[images]` section.
fn image_resolver(config: &Config, storage: Arc<dyn StorageBackend>) -> ImageUrlResolver {
    let images = &config.images;
    let resolver = ImageUrlResolver::new(storage).with_gravatar(GravatarOptions {
        base_url: images.gravatar_url.clone(),
        default_image: images.gravatar_default.clone(),
        rating: images.gravatar_rating.clone(),
    });

    match images.default_category_image.clone() {
        Some(image) => resolver.with_category_default(move |_, _| image.clone()),
        None => resolver,
    }
}
