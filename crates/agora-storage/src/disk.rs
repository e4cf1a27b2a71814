//! Upload-folder storage backend.
//!
//! Files are served from a public upload folder, one subfolder per owner:
//! `{upload_url}/{owner_id}/{file_name}{query}`. An optional absolute base
//! URL (e.g. a CDN host) is prepended.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use uuid::Uuid;

use crate::storage::{StorageBackend, StorageError, StorageErrorKind};

/// Unreserved URL characters: A-Z a-z 0-9 - . _ ~
const FILE_NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Default public path of the uploads folder.
pub const DEFAULT_UPLOAD_URL: &str = "/content/uploads";

/// Storage backend for uploads served from a public folder.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    upload_url: String,
    base_url: Option<String>,
}

impl Default for DiskStorage {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_owned(),
            base_url: None,
        }
    }
}

impl DiskStorage {
    /// Create a backend serving uploads from `upload_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Misconfigured`] if `upload_url` is empty.
    pub fn new(upload_url: impl Into<String>) -> Result<Self, StorageError> {
        let upload_url = upload_url.into();
        let trimmed = upload_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(StorageError::new(StorageErrorKind::Misconfigured).with_backend("Disk"));
        }
        Ok(Self {
            upload_url: trimmed.to_owned(),
            base_url: None,
        })
    }

    /// Serve uploads from an absolute host (e.g., `https://cdn.example.com`).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_owned());
        self
    }

    /// Public path of the uploads folder.
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

impl StorageBackend for DiskStorage {
    fn name(&self) -> &'static str {
        "Disk"
    }

    fn build_file_url(
        &self,
        owner_id: Uuid,
        separator: &str,
        file_name: &str,
        query: &str,
    ) -> Result<String, StorageError> {
        if file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name.contains(['/', '\\'])
        {
            return Err(StorageError::invalid_path(file_name).with_backend(self.name()));
        }

        let encoded = percent_encode(file_name.as_bytes(), FILE_NAME_ENCODE_SET);
        let host = self.base_url.as_deref().unwrap_or_default();
        let upload_url = &self.upload_url;

        Ok(format!(
            "{host}{upload_url}/{owner_id}{separator}{encoded}{query}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn owner() -> Uuid {
        Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap()
    }

    #[test]
    fn test_default_upload_url() {
        let storage = DiskStorage::default();

        let url = storage
            .build_file_url(owner(), "/", "avatar.png", "?width=50")
            .unwrap();

        assert_eq!(
            url,
            "/content/uploads/6f9619ff-8b86-d011-b42d-00c04fc964ff/avatar.png?width=50"
        );
    }

    #[test]
    fn test_custom_upload_url_trailing_slash() {
        let storage = DiskStorage::new("/media/").unwrap();

        let url = storage.build_file_url(owner(), "/", "a.gif", "").unwrap();

        assert_eq!(url, "/media/6f9619ff-8b86-d011-b42d-00c04fc964ff/a.gif");
    }

    #[test]
    fn test_base_url_prepended() {
        let storage = DiskStorage::default().with_base_url("https://cdn.example.com/");

        let url = storage.build_file_url(owner(), "/", "a.png", "").unwrap();

        assert_eq!(
            url,
            "https://cdn.example.com/content/uploads/6f9619ff-8b86-d011-b42d-00c04fc964ff/a.png"
        );
    }

    #[test]
    fn test_file_name_is_percent_encoded() {
        let storage = DiskStorage::default();

        let url = storage
            .build_file_url(owner(), "/", "my photo (1).jpg", "")
            .unwrap();

        assert!(url.ends_with("/my%20photo%20%281%29.jpg"), "got {url}");
    }

    #[test]
    fn test_rejects_path_traversal() {
        let storage = DiskStorage::default();

        for name in ["../etc/passwd", "a/b.png", "a\\b.png", "..", ""] {
            let err = storage.build_file_url(owner(), "/", name, "").unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "name {name:?}");
            assert_eq!(err.backend, Some("Disk"));
        }
    }

    #[test]
    fn test_empty_upload_url_is_misconfigured() {
        let err = DiskStorage::new("/").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Misconfigured);
    }
}
