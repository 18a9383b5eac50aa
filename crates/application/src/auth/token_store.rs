//! Role-keyed credential store.
//!
//! Holds, per role, an access token, a refresh token, and an opaque
//! identity string, all written through to the persistence port so they
//! survive the process. No expiry is tracked client-side; a token is
//! considered expired only when the server rejects it with a 401.

use storefront_domain::Role;

use crate::ApplicationResult;
use crate::ports::CredentialStorage;

/// Persisted credential store keyed by [`Role`].
///
/// Cloning a store backed by a shared storage handle yields handles
/// observing the same persisted state.
#[derive(Debug, Clone)]
pub struct TokenStore<S: CredentialStorage> {
    storage: S,
}

impl<S: CredentialStorage> TokenStore<S> {
    /// Creates a store over the given persistence backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persists the access token for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub async fn save_token(&self, role: Role, token: &str) -> ApplicationResult<()> {
        self.storage.set(&role.token_key(), token).await?;
        Ok(())
    }

    /// Reads the access token for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub async fn token(&self, role: Role) -> ApplicationResult<Option<String>> {
        Ok(self.storage.get(&role.token_key()).await?)
    }

    /// Persists the refresh token for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub async fn save_refresh(&self, role: Role, token: &str) -> ApplicationResult<()> {
        self.storage.set(&role.refresh_token_key(), token).await?;
        Ok(())
    }

    /// Reads the refresh token for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub async fn refresh(&self, role: Role) -> ApplicationResult<Option<String>> {
        Ok(self.storage.get(&role.refresh_token_key()).await?)
    }

    /// Persists the identity string for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub async fn save_identity(&self, role: Role, identity: &str) -> ApplicationResult<()> {
        self.storage.set(&role.identity_key(), identity).await?;
        Ok(())
    }

    /// Reads the identity string for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub async fn identity(&self, role: Role) -> ApplicationResult<Option<String>> {
        Ok(self.storage.get(&role.identity_key()).await?)
    }

    /// Removes all three credential records for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub async fn clear(&self, role: Role) -> ApplicationResult<()> {
        self.storage.remove(&role.token_key()).await?;
        self.storage.remove(&role.refresh_token_key()).await?;
        self.storage.remove(&role.identity_key()).await?;
        Ok(())
    }
}
