pub mod cli;
pub mod config;
pub mod credentials;
pub mod http;
pub mod log;
pub mod models;
pub mod presentation;
pub mod services;

pub use crate::credentials::{FileSecureStore, MemorySecureStore, SecureStore};
pub use crate::http::{ApiClient, ApiError, ApiErrorKind, QueryParams};
pub use crate::presentation::error_message;
