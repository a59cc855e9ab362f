//! Error types for wallet API client operations.
//!
//! Every failure that leaves the client is an [`ApiError`]. The error carries a
//! human readable message, the HTTP status that produced it (`0` when no HTTP
//! response was involved), a closed [`ApiErrorKind`] tag and, where one exists,
//! the underlying failure for diagnostics.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed underlying failure wrapped by an [`ApiError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed classification of API failures.
///
/// Callers pattern-match on this tag instead of inspecting status codes or
/// transport errors. The set is not extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    /// The server could not be reached (DNS failure, connection refused, reset).
    NetworkError,
    /// The request deadline elapsed before the exchange completed.
    Timeout,
    /// The server answered with a 5xx status.
    ServerError,
    /// The server answered with 401.
    Unauthorized,
    /// The server answered with 404.
    NotFound,
    /// The server answered with any other 4xx status.
    ValidationError,
    /// Anything else, including non-2xx statuses outside 4xx/5xx.
    Unknown,
}

impl ApiErrorKind {
    /// Maps a non-success HTTP status to its kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400..=499 => Self::ValidationError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::ServerError => "SERVER_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error returned by every [`ApiClient`](crate::http::ApiClient) operation.
///
/// Fields are private: the constructors are the only way to build one, and
/// they guarantee that a status of `0` is only ever paired with
/// [`ApiErrorKind::NetworkError`], [`ApiErrorKind::Timeout`] or
/// [`ApiErrorKind::Unknown`].
///
/// # Example
///
/// ```rust
/// use wallet_client::http::{ApiError, ApiErrorKind};
///
/// let err = ApiError::from_status(422, "Amount must be positive");
/// assert_eq!(err.kind(), ApiErrorKind::ValidationError);
/// assert_eq!(err.status(), 422);
/// assert_eq!(err.to_string(), "Amount must be positive");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: u16,
    kind: ApiErrorKind,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    /// Builds the error for a non-success HTTP response.
    ///
    /// The kind is derived from `status`, so callers cannot pair an HTTP
    /// status with a transport-level kind.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            kind: ApiErrorKind::from_status(status),
            source: None,
        }
    }

    /// The server could not be reached.
    pub fn network(source: impl Into<BoxError>) -> Self {
        Self {
            message: "Unable to reach the server".to_string(),
            status: 0,
            kind: ApiErrorKind::NetworkError,
            source: Some(source.into()),
        }
    }

    /// The request deadline elapsed.
    pub fn timeout(deadline: Duration) -> Self {
        Self {
            message: format!("Request timed out after {} ms", deadline.as_millis()),
            status: 0,
            kind: ApiErrorKind::Timeout,
            source: None,
        }
    }

    /// Any failure that is neither an HTTP status nor a connectivity problem.
    pub fn unknown(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            kind: ApiErrorKind::Unknown,
            source,
        }
    }

    /// Classifies a failure reported by the HTTP transport.
    ///
    /// Timeouts raised by the transport itself map to [`ApiErrorKind::Timeout`],
    /// connection, request and body transfer failures to
    /// [`ApiErrorKind::NetworkError`], and everything else (decode, builder,
    /// redirect failures) to [`ApiErrorKind::Unknown`].
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport_timeout(err)
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::network(err)
        } else {
            Self::unknown(format!("Unexpected transport failure: {err}"), Some(err.into()))
        }
    }

    /// Classifies a failure while streaming a response body.
    ///
    /// The client decodes payloads itself, so any error here is a broken
    /// connection, even though reqwest reports a truncated body as a decode
    /// error.
    pub fn from_body_read(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport_timeout(err)
        } else {
            Self::network(err)
        }
    }

    fn transport_timeout(err: reqwest::Error) -> Self {
        Self {
            message: "Request timed out".to_string(),
            status: 0,
            kind: ApiErrorKind::Timeout,
            source: Some(err.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed response, `0` for non-HTTP failures.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// True for connectivity problems, including timeouts.
    pub fn is_network_error(&self) -> bool {
        matches!(self.kind, ApiErrorKind::NetworkError | ApiErrorKind::Timeout)
    }

    pub fn is_auth_error(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

/// Normalizes an arbitrary failure into the closed taxonomy.
///
/// An [`ApiError`] already carried inside the `anyhow::Error` is returned
/// unchanged instead of being wrapped a second time.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_error) => api_error,
            Err(other) => Self::unknown(other.to_string(), Some(other.into())),
        }
    }
}
