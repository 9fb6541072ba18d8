use async_trait::async_trait;
use quiz_core::model::Credentials;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Where the signed-in user's token and profile live between launches.
///
/// There is at most one stored login at a time.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the stored login, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self) -> Result<Option<Credentials>, StorageError>;

    /// Replace the stored login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the credentials cannot be stored.
    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError>;

    /// Remove the stored login. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory store for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    credentials: Arc<Mutex<Option<Credentials>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryRepository {
    async fn load(&self) -> Result<Option<Credentials>, StorageError> {
        let guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub credentials: Arc<dyn CredentialStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryRepository::new());
        Self { credentials }
    }
}
