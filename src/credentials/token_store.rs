//! Access/refresh token lifecycle on top of a [`SecureStore`].
//!
//! Reads and deletes never fail towards the caller: a store that cannot be
//! read behaves as if no token were stored, and logout cannot be blocked by a
//! store that refuses to delete. Writes do fail, wrapped in an [`ApiError`].
//! Token values are never logged.

use std::sync::Arc;

use log::{debug, warn};

use super::store::SecureStore;
use crate::http::ApiError;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Clone)]
pub struct TokenStore {
    secure_store: Arc<dyn SecureStore>,
}

impl TokenStore {
    pub fn new(secure_store: Arc<dyn SecureStore>) -> Self {
        Self { secure_store }
    }

    /// Current access token, `None` when absent or unreadable.
    pub async fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY).await
    }

    pub async fn set_access_token(&self, token: &str) -> Result<(), ApiError> {
        self.write(ACCESS_TOKEN_KEY, token).await
    }

    pub async fn set_refresh_token(&self, token: &str) -> Result<(), ApiError> {
        self.write(REFRESH_TOKEN_KEY, token).await
    }

    /// Removes both tokens concurrently. Failures are logged only.
    pub async fn clear_all(&self) {
        let (access, refresh) = tokio::join!(
            self.secure_store.delete(ACCESS_TOKEN_KEY),
            self.secure_store.delete(REFRESH_TOKEN_KEY)
        );

        for (key, result) in [(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)] {
            if let Err(e) = result {
                warn!(key = key, error:% = e; "Failed to delete credential");
            }
        }
        debug!("Credentials cleared");
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.secure_store.get(key).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(key = key, error:% = e; "Failed to read credential, continuing without it");
                None
            },
        }
    }

    async fn write(&self, key: &str, token: &str) -> Result<(), ApiError> {
        self.secure_store.set(key, token).await.map_err(|e| {
            warn!(key = key, error:% = e; "Failed to store credential");
            ApiError::unknown(format!("Failed to store {key}"), Some(e.into()))
        })
    }
}
