//! CLI error types.

use agora_config::ConfigError;
use agora_content::ContentError;
use agora_seo::SeoError;
use agora_site::SiteError;
use agora_storage::{ResolveError, StorageError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Seo(#[from] SeoError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
