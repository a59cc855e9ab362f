//! User-facing copy for failures.
//!
//! The wording depends only on the error kind so the user sees the same text
//! regardless of what the backend put in its error body. Validation errors are
//! the exception: the server's explanation is shown when it gave one.

use std::any::Any;

use crate::http::{ApiError, ApiErrorKind, BoxError};

pub const NETWORK_MESSAGE: &str = "No internet connection. Please check your network and try again.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const UNAUTHORIZED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const SERVER_MESSAGE: &str = "Server error. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const VALIDATION_MESSAGE: &str = "Invalid request. Please check your input.";
pub const DEFAULT_MESSAGE: &str = "An unexpected error occurred.";

/// Message for a structured API error.
pub fn api_error_message(error: &ApiError) -> String {
    match error.kind() {
        ApiErrorKind::NetworkError => NETWORK_MESSAGE.to_string(),
        ApiErrorKind::Timeout => TIMEOUT_MESSAGE.to_string(),
        ApiErrorKind::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
        ApiErrorKind::ServerError => SERVER_MESSAGE.to_string(),
        ApiErrorKind::NotFound => NOT_FOUND_MESSAGE.to_string(),
        ApiErrorKind::ValidationError => non_empty_or(error.message(), VALIDATION_MESSAGE),
        ApiErrorKind::Unknown => non_empty_or(error.message(), DEFAULT_MESSAGE),
    }
}

/// Message for any failure value.
///
/// [`ApiError`]s (also when carried inside an `anyhow::Error` or a boxed
/// error) get their kind-specific copy, other errors their own message, and
/// values that are not errors at all the generic fallback.
///
/// ```rust
/// use wallet_client::http::ApiError;
/// use wallet_client::presentation::error_message;
///
/// assert_eq!(
///     error_message(&ApiError::from_status(401, "")),
///     "Your session has expired. Please log in again."
/// );
/// assert_eq!(error_message(&"string error"), "An unexpected error occurred.");
/// ```
pub fn error_message(value: &dyn Any) -> String {
    if let Some(error) = value.downcast_ref::<ApiError>() {
        return api_error_message(error);
    }

    if let Some(error) = value.downcast_ref::<anyhow::Error>() {
        return match error.downcast_ref::<ApiError>() {
            Some(api_error) => api_error_message(api_error),
            None => non_empty_or(&error.to_string(), DEFAULT_MESSAGE),
        };
    }

    if let Some(error) = value.downcast_ref::<BoxError>() {
        return match error.downcast_ref::<ApiError>() {
            Some(api_error) => api_error_message(api_error),
            None => non_empty_or(&error.to_string(), DEFAULT_MESSAGE),
        };
    }

    if let Some(error) = value.downcast_ref::<std::io::Error>() {
        return non_empty_or(&error.to_string(), DEFAULT_MESSAGE);
    }

    DEFAULT_MESSAGE.to_string()
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}
