//! Key-value storage for auth state.
//!
//! Auth state persists under three string keys (`token`, `user`, `theme`) plus
//! the `notices` queue. In production the values live in the visitor's
//! `tower-sessions` session; tests use [`MemoryStorage`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Storage keys.
pub mod keys {
    /// Bearer token issued by the backend.
    pub const TOKEN: &str = "token";
    /// JSON-serialized user profile.
    pub const USER: &str = "user";
    /// `"dark"` or `"light"`.
    pub const THEME: &str = "theme";
    /// JSON array of pending notices.
    pub const NOTICES: &str = "notices";
}

/// Errors from the underlying session store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-valued key-value store scoped to one visitor.
///
/// Mirrors browser local storage: missing keys read as `None` and removing a
/// missing key is not an error.
#[async_trait::async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store fails.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store fails.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store fails.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait::async_trait]
impl SessionStorage for tower_sessions::Session {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get::<String>(key).await?)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.remove_value(key).await?;
        Ok(())
    }
}

/// In-memory storage for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SessionStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.data.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;

    #[tokio::test]
    async fn test_memory_storage_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item(keys::TOKEN).await.unwrap(), None);
        storage.remove_item(keys::TOKEN).await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_storage_overwrite() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::THEME, "light").await.unwrap();
        storage.set_item(keys::THEME, "dark").await.unwrap();
        assert_eq!(
            storage.get_item(keys::THEME).await.unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_tower_session_storage() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        session.set_item(keys::TOKEN, "abc").await.unwrap();
        assert_eq!(
            session.get_item(keys::TOKEN).await.unwrap().as_deref(),
            Some("abc")
        );

        session.remove_item(keys::TOKEN).await.unwrap();
        assert_eq!(session.get_item(keys::TOKEN).await.unwrap(), None);

        // Removing twice is fine
        session.remove_item(keys::TOKEN).await.unwrap();
    }
}
