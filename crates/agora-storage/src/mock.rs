//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without a real upload store.

use std::sync::RwLock;

use uuid::Uuid;

use crate::storage::{StorageBackend, StorageError, StorageErrorKind};

/// Arguments of one `build_file_url` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub owner_id: Uuid,
    pub separator: String,
    pub file_name: String,
    pub query: String,
}

/// Mock storage for testing.
///
/// Returns `mock://{owner}{separator}{file}{query}` and records every call.
/// Use [`failing`](Self::failing) to make every call return an error.
///
/// # Example
///
/// ```ignore
/// use agora_storage::{MockStorage, StorageBackend};
/// use uuid::Uuid;
///
/// let storage = MockStorage::new();
/// let url = storage.build_file_url(Uuid::nil(), "/", "a.png", "").unwrap();
/// assert_eq!(storage.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    calls: RwLock<Vec<RecordedCall>>,
    failure: Option<StorageErrorKind>,
}

impl MockStorage {
    /// Create a new mock storage that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock storage whose every call fails with `kind`.
    #[must_use]
    pub fn failing(kind: StorageErrorKind) -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            failure: Some(kind),
        }
    }

    /// Calls recorded so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().unwrap().clone()
    }
}

impl StorageBackend for MockStorage {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn build_file_url(
        &self,
        owner_id: Uuid,
        separator: &str,
        file_name: &str,
        query: &str,
    ) -> Result<String, StorageError> {
        self.calls.write().unwrap().push(RecordedCall {
            owner_id,
            separator: separator.to_owned(),
            file_name: file_name.to_owned(),
            query: query.to_owned(),
        });

        if let Some(kind) = self.failure {
            return Err(StorageError::new(kind)
                .with_file_name(file_name)
                .with_backend(self.name()));
        }

        Ok(format!("mock://{owner_id}{separator}{file_name}{query}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let storage = MockStorage::new();
        let owner = Uuid::new_v4();

        let url = storage.build_file_url(owner, "/", "a.png", "?x=1").unwrap();

        assert_eq!(url, format!("mock://{owner}/a.png?x=1"));
        assert_eq!(
            storage.calls(),
            vec![RecordedCall {
                owner_id: owner,
                separator: "/".to_owned(),
                file_name: "a.png".to_owned(),
                query: "?x=1".to_owned(),
            }]
        );
    }

    #[test]
    fn test_mock_failing() {
        let storage = MockStorage::failing(StorageErrorKind::Unavailable);

        let err = storage
            .build_file_url(Uuid::nil(), "/", "a.png", "")
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Unavailable);
        assert_eq!(err.backend, Some("Mock"));
        assert_eq!(storage.calls().len(), 1);
    }
}
