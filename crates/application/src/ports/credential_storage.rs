//! Credential storage port.
//!
//! String-valued key-value persistence for tokens and identities, scoped
//! to the local profile. Keys follow the `api_token<role>` layout the
//! token store derives from [`storefront_domain::Role`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

/// Port for persisting string key-value credential data.
pub trait CredentialStorage: Send + Sync {
    /// Reads a value, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Writes a value, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Credential storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error from the backing store.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted data could not be parsed or written.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// In-memory credential storage.
///
/// Suitable for tests and ephemeral sessions; nothing survives the
/// process. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCredentialStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryCredentialStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryCredentialStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", "v1").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some("v1".to_string()));

        storage.set("k", "v2").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some("v2".to_string()));

        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryCredentialStorage::new();
        let handle = storage.clone();
        storage.set("k", "v").await.unwrap();
        assert_eq!(handle.get("k").await.unwrap(), Some("v".to_string()));
    }
}
