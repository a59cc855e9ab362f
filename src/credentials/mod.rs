//! Credential persistence for the API client.
//!
//! [`SecureStore`] is the platform boundary (keychain, keystore, a file on
//! disk). [`TokenStore`] implements the access/refresh token lifecycle on top
//! of it with the failure policy the client relies on.

mod file;
mod memory;
mod store;
mod token_store;

pub use file::FileSecureStore;
pub use memory::MemorySecureStore;
pub use store::{SecureStore, SecureStoreError, SecureStoreResult};
pub use token_store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};

#[cfg(test)]
pub(crate) use token_store::tests::FailingStore;
