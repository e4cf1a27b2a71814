//! Site-level helpers for Agora.
//!
//! Small pieces the page layer needs around the core rendering code:
//!
//! - [`is_static_resource`] / [`file_is_image`]: classify request paths and uploads
//! - [`theme_folders`]: installed themes under the theme root
//! - [`category_rss_url`] / [`badge_url`]: URL builders
//! - [`ping`]: best-effort reachability probe

mod ping;
mod resource;
mod theme;
mod urls;

use std::path::PathBuf;

pub use ping::{PING_TIMEOUT, ping};
pub use resource::{file_is_image, is_static_resource};
pub use theme::theme_folders;
pub use urls::{DEFAULT_BADGE_ROOT, badge_url, category_rss_url};

/// Site helper error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Theme root directory does not exist.
    #[error("Theme folder not found: {}", .0.display())]
    ThemeRootNotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
