//! Avatar and category image URL resolution.
//!
//! Stored uploads are resolved through the injected [`StorageBackend`];
//! members without an upload fall back to Gravatar, categories without an
//! upload fall back to a caller-supplied [`DefaultImageLocator`] or to no
//! image at all.

use std::sync::Arc;

use uuid::Uuid;

use crate::gravatar::GravatarOptions;
use crate::storage::{PATH_SEPARATOR, StorageBackend, StorageError};

/// Image resolution error.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Caller passed an unusable argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Storage backend failed; passed through unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Square crop query suffix for `size` pixels.
///
/// ```
/// assert_eq!(agora_storage::crop_query(50), "?width=50&crop=0,0,50,50");
/// ```
pub fn crop_query(size: u32) -> String {
    format!("?width={size}&crop=0,0,{size},{size}")
}

/// Locates the default image for an owner that has no upload.
pub trait DefaultImageLocator: Send + Sync {
    /// Default image URL for `owner_id` at `size` pixels.
    fn locate(&self, owner_id: Uuid, size: u32) -> String;
}

impl<F> DefaultImageLocator for F
where
    F: Fn(Uuid, u32) -> String + Send + Sync,
{
    fn locate(&self, owner_id: Uuid, size: u32) -> String {
        self(owner_id, size)
    }
}

/// A request for an owner's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Owner of the image (member or category id).
    pub owner_id: Uuid,
    /// Name the upload was stored under, if any.
    pub stored_file_name: Option<String>,
    /// Square size in pixels.
    pub size: u32,
}

impl ImageRequest {
    /// Create a request for an owner with an optional upload.
    #[must_use]
    pub fn new(owner_id: Uuid, stored_file_name: Option<String>, size: u32) -> Self {
        Self {
            owner_id,
            stored_file_name,
            size,
        }
    }

    fn file_name(&self) -> &str {
        self.stored_file_name.as_deref().unwrap_or_default()
    }
}

/// Resolves avatar and category image URLs.
///
/// Holds no state of its own besides configuration; the backend is shared
/// with every other user of the same `Arc`.
pub struct ImageUrlResolver {
    storage: Arc<dyn StorageBackend>,
    gravatar: GravatarOptions,
    category_default: Option<Box<dyn DefaultImageLocator>>,
}

impl ImageUrlResolver {
    /// Create a resolver using `storage` for uploaded files.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            gravatar: GravatarOptions::default(),
            category_default: None,
        }
    }

    /// Override Gravatar settings used for members without an avatar.
    #[must_use]
    pub fn with_gravatar(mut self, gravatar: GravatarOptions) -> Self {
        self.gravatar = gravatar;
        self
    }

    /// Set the default image for categories without an upload.
    #[must_use]
    pub fn with_category_default<L: DefaultImageLocator + 'static>(mut self, locator: L) -> Self {
        self.category_default = Some(Box::new(locator));
        self
    }

    /// Resolve a member avatar URL.
    ///
    /// With an uploaded file the backend URL is returned verbatim. Without
    /// one the Gravatar URL for `identity_key` is returned, which does not
    /// depend on `owner_id`.
    pub fn avatar_url(
        &self,
        stored_file_name: &str,
        identity_key: &str,
        owner_id: Uuid,
        size: u32,
    ) -> Result<String, ResolveError> {
        check_size(size)?;
        if let Some(url) = self.stored_url(stored_file_name, owner_id, size)? {
            return Ok(url);
        }
        Ok(self.gravatar.image_url(identity_key, size))
    }

    /// Resolve a category image URL.
    ///
    /// Returns `Ok(None)` when the category has no upload and no default
    /// image is configured.
    pub fn category_image_url(
        &self,
        stored_file_name: &str,
        owner_id: Uuid,
        size: u32,
    ) -> Result<Option<String>, ResolveError> {
        check_size(size)?;
        if let Some(url) = self.stored_url(stored_file_name, owner_id, size)? {
            return Ok(Some(url));
        }
        Ok(self
            .category_default
            .as_ref()
            .map(|locator| locator.locate(owner_id, size)))
    }

    /// [`avatar_url`](Self::avatar_url) for an [`ImageRequest`].
    pub fn avatar_url_for(
        &self,
        request: &ImageRequest,
        identity_key: &str,
    ) -> Result<String, ResolveError> {
        self.avatar_url(
            request.file_name(),
            identity_key,
            request.owner_id,
            request.size,
        )
    }

    /// [`category_image_url`](Self::category_image_url) for an [`ImageRequest`].
    pub fn category_image_url_for(
        &self,
        request: &ImageRequest,
    ) -> Result<Option<String>, ResolveError> {
        self.category_image_url(request.file_name(), request.owner_id, request.size)
    }

    /// Backend URL for an uploaded file, or `None` when nothing was uploaded.
    fn stored_url(
        &self,
        stored_file_name: &str,
        owner_id: Uuid,
        size: u32,
    ) -> Result<Option<String>, ResolveError> {
        if stored_file_name.trim().is_empty() {
            return Ok(None);
        }
        tracing::trace!(
            backend = self.storage.name(),
            %owner_id,
            file = stored_file_name,
            "Resolving stored image"
        );
        let url = self.storage.build_file_url(
            owner_id,
            PATH_SEPARATOR,
            stored_file_name,
            &crop_query(size),
        )?;
        Ok(Some(url))
    }
}

fn check_size(size: u32) -> Result<(), ResolveError> {
    if size == 0 {
        return Err(ResolveError::InvalidArgument(
            "image size must be greater than 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::{MockStorage, RecordedCall};
    use crate::storage::StorageErrorKind;

    fn resolver_with(storage: &Arc<MockStorage>) -> ImageUrlResolver {
        ImageUrlResolver::new(Arc::clone(storage) as Arc<dyn StorageBackend>)
    }

    #[test]
    fn test_crop_query() {
        assert_eq!(crop_query(50), "?width=50&crop=0,0,50,50");
        assert_eq!(crop_query(1), "?width=1&crop=0,0,1,1");
    }

    #[test]
    fn test_avatar_with_upload_delegates_to_storage() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);
        let id = Uuid::new_v4();

        let url = resolver
            .avatar_url("pic.png", "user@example.com", id, 50)
            .unwrap();

        assert_eq!(url, format!("mock://{id}/pic.png?width=50&crop=0,0,50,50"));
        assert_eq!(
            storage.calls(),
            vec![RecordedCall {
                owner_id: id,
                separator: "/".to_owned(),
                file_name: "pic.png".to_owned(),
                query: "?width=50&crop=0,0,50,50".to_owned(),
            }]
        );
    }

    #[test]
    fn test_avatar_without_upload_uses_gravatar() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);

        let url = resolver
            .avatar_url("", "user@example.com", Uuid::new_v4(), 50)
            .unwrap();

        assert_eq!(
            url,
            "https://www.gravatar.com/avatar/b58996c504c5638798eb6b511e6f49af?s=50&d=identicon&r=pg"
        );
        assert!(storage.calls().is_empty());
    }

    #[test]
    fn test_avatar_fallback_independent_of_owner() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);

        let a = resolver
            .avatar_url("", "user@example.com", Uuid::new_v4(), 50)
            .unwrap();
        let b = resolver
            .avatar_url("", "user@example.com", Uuid::new_v4(), 50)
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_whitespace_file_name_counts_as_missing() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);

        let url = resolver
            .avatar_url("   ", "user@example.com", Uuid::nil(), 50)
            .unwrap();

        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert!(storage.calls().is_empty());
    }

    #[test]
    fn test_storage_failure_propagates() {
        let storage = Arc::new(MockStorage::failing(StorageErrorKind::Unavailable));
        let resolver = resolver_with(&storage);

        let err = resolver
            .avatar_url("pic.png", "user@example.com", Uuid::nil(), 50)
            .unwrap_err();

        match err {
            ResolveError::Storage(e) => assert_eq!(e.kind, StorageErrorKind::Unavailable),
            ResolveError::InvalidArgument(_) => panic!("expected storage error"),
        }
        // No retry.
        assert_eq!(storage.calls().len(), 1);
    }

    #[test]
    fn test_zero_size_rejected() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);

        let err = resolver
            .category_image_url("c.png", Uuid::nil(), 0)
            .unwrap_err();

        assert!(matches!(err, ResolveError::InvalidArgument(_)));
        assert!(storage.calls().is_empty());
    }

    #[test]
    fn test_category_with_upload() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);
        let id = Uuid::new_v4();

        let url = resolver.category_image_url("c.png", id, 64).unwrap();

        assert_eq!(
            url,
            Some(format!("mock://{id}/c.png?width=64&crop=0,0,64,64"))
        );
    }

    #[test]
    fn test_category_without_upload_or_default_is_none() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);

        let url = resolver.category_image_url("", Uuid::nil(), 64).unwrap();

        assert_eq!(url, None);
    }

    #[test]
    fn test_category_default_locator() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage)
            .with_category_default(|_id: Uuid, size: u32| format!("/img/category.png?w={size}"));

        let url = resolver.category_image_url("", Uuid::nil(), 64).unwrap();

        assert_eq!(url.as_deref(), Some("/img/category.png?w=64"));
    }

    #[test]
    fn test_image_request_variants() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(&storage);
        let id = Uuid::new_v4();

        let with_file = ImageRequest::new(id, Some("x.jpg".to_owned()), 20);
        let without_file = ImageRequest::new(id, None, 20);

        assert_eq!(
            resolver.avatar_url_for(&with_file, "a@b.c").unwrap(),
            format!("mock://{id}/x.jpg?width=20&crop=0,0,20,20")
        );
        assert!(
            resolver
                .avatar_url_for(&without_file, "a@b.c")
                .unwrap()
                .contains("?s=20")
        );
        assert_eq!(resolver.category_image_url_for(&without_file).unwrap(), None);
    }
}
