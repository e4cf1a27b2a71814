//! Storage backends and image URL resolution for Agora forum pages.
//!
//! This crate provides a [`StorageBackend`] trait that turns a stored file
//! reference into a servable URL, and an [`ImageUrlResolver`] that builds
//! avatar and category image URLs on top of it. This enables:
//!
//! - **Backend flexibility** (local uploads folder, CDN, object store)
//! - **Explicit wiring**: one shared backend is injected into the resolver
//!   instead of being looked up from global state
//! - **Unit testing** without a real upload store
//!
//! # Architecture
//!
//! The crate provides:
//! - [`StorageBackend`] trait with a single `build_file_url()` method
//! - [`DiskStorage`] for uploads served from a public folder or CDN
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - [`ImageUrlResolver`] with a Gravatar fallback for avatars
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use agora_storage::{DiskStorage, ImageUrlResolver};
//! use uuid::Uuid;
//!
//! let resolver = ImageUrlResolver::new(Arc::new(DiskStorage::default()));
//! let owner = Uuid::nil();
//!
//! let url = resolver.avatar_url("me.png", "user@example.com", owner, 50).unwrap();
//! assert_eq!(
//!     url,
//!     "/content/uploads/00000000-0000-0000-0000-000000000000/me.png?width=50&crop=0,0,50,50"
//! );
//! ```

mod disk;
mod gravatar;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod resolver;
mod storage;

pub use disk::{DEFAULT_UPLOAD_URL, DiskStorage};
pub use gravatar::GravatarOptions;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockStorage, RecordedCall};
pub use resolver::{
    DefaultImageLocator, ImageRequest, ImageUrlResolver, ResolveError, crop_query,
};
pub use storage::{PATH_SEPARATOR, StorageBackend, StorageError, StorageErrorKind};
