//! Storage backend trait and error types.
//!
//! Provides the core [`StorageBackend`] trait for turning stored file
//! references into display URLs, along with [`StorageError`] for unified
//! error handling across backends.
//!
//! # File Addressing
//!
//! Every stored file belongs to an owner (a member, a category, ...) and is
//! addressed by the owner's id plus the file name the upload was saved under:
//! - `(owner, "/", "avatar.png", "")` - plain file URL
//! - `(owner, "/", "avatar.png", "?width=50")` - URL with resize parameters
//!
//! Backends decide how those parts map onto a servable URL.

use uuid::Uuid;

/// Separator placed between the owner segment and the file name.
pub const PATH_SEPARATOR: &str = "/";

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Stored file does not exist.
    NotFound,
    /// File name or separator cannot be turned into a URL.
    InvalidPath,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Backend is not configured correctly.
    Misconfigured,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// File name context (if applicable).
    pub file_name: Option<String>,
    /// Backend identifier (e.g., "Disk", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            file_name: None,
            backend: None,
            source: None,
        }
    }

    /// Attach file name context.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create an invalid path error for a file name.
    #[must_use]
    pub fn invalid_path(file_name: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::InvalidPath).with_file_name(file_name)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (file: avatar.png)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Misconfigured => "Misconfigured",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(file_name) = &self.file_name {
            write!(f, " (file: {file_name})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for turning stored files into display URLs.
///
/// One backend instance is created per process and shared (usually as
/// `Arc<dyn StorageBackend>`) by every caller that needs file URLs.
/// Implementations must not keep per-request state.
pub trait StorageBackend: Send + Sync {
    /// Short backend name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Build the display URL for a stored file.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Id of the entity that owns the file
    /// * `separator` - Separator between the owner segment and the file name
    /// * `file_name` - Name the file was stored under
    /// * `query` - Query-string suffix appended verbatim (may be empty)
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file reference cannot be turned into a
    /// URL (e.g., invalid file name, backend unavailable).
    fn build_file_url(
        &self,
        owner_id: Uuid,
        separator: &str,
        file_name: &str,
        query: &str,
    ) -> Result<String, StorageError>;
}
