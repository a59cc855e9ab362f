//! HTTP client module for the wallet REST backend.
//!
//! This module provides the typed client every service wrapper goes through.
//! It owns request construction, the request deadline and the classification
//! of responses into either a decoded payload or an [`ApiError`].
//!
//! # Architecture
//!
//! - [`ApiClient`] - builds, sends and classifies requests; exposes the
//!   token lifecycle used for session management
//! - [`ApiError`] / [`ApiErrorKind`] - the closed error taxonomy
//! - [`QueryParams`] - query string construction
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use url::Url;
//! use wallet_client::credentials::MemorySecureStore;
//! use wallet_client::http::{ApiClient, ApiErrorKind, QueryParams};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = ApiClient::new(Url::parse("http://localhost:3000")?, Arc::new(MemorySecureStore::new()))?;
//!
//! let query = QueryParams::new().param("page", Some(1)).param("per_page", Some(15));
//! match client.get::<serde_json::Value>("/transactions", Some(&query)).await {
//!     Ok(page) => println!("{page}"),
//!     Err(e) if e.kind() == ApiErrorKind::Unauthorized => println!("log in first"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every failure is an [`ApiError`]:
//!
//! - Network failures (connection refused, DNS) and the request deadline
//! - HTTP failures (4xx/5xx responses), classified by status
//! - Anything else (malformed payloads, invalid URLs) as `UNKNOWN`

mod error;
mod http_client;
mod query;

pub use error::{ApiError, ApiErrorKind, BoxError};
pub use http_client::{ApiClient, DEFAULT_TIMEOUT};
pub use query::QueryParams;
