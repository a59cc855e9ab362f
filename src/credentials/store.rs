// Secure key-value storage consumed by the token lifecycle.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecureStoreError {
    #[error("Secure store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Secure store contents are corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Secure store unavailable: {0}")]
    Unavailable(String),
}

pub type SecureStoreResult<T> = Result<T, SecureStoreError>;

/// Platform secure storage for credentials.
///
/// Every operation may fail. The token lifecycle decides which failures are
/// surfaced (writes) and which are only logged (reads and deletes).
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written or was deleted.
    async fn get(&self, key: &str) -> SecureStoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> SecureStoreResult<()>;

    /// Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> SecureStoreResult<()>;
}
