use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use super::error::ApiError;
use super::query::QueryParams;
use crate::credentials::{SecureStore, TokenStore};

/// Deadline applied to a whole request: connect, response and body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

const USER_AGENT: &str = "wallet-client/0.1";

/// Typed client for the wallet REST backend.
///
/// Every request carries `Content-Type: application/json` and, when an access
/// token is stored, `Authorization: Bearer <token>`. Each call runs under a
/// single deadline and resolves to the decoded payload or an [`ApiError`].
/// The client never retries.
///
/// The client holds no mutable state of its own and is meant to be shared
/// behind an [`Arc`] by the service wrappers.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use url::Url;
/// use wallet_client::credentials::MemorySecureStore;
/// use wallet_client::http::ApiClient;
///
/// # async fn example() -> Result<(), anyhow::Error> {
/// let client = ApiClient::new(
///     Url::parse("http://localhost:3000")?,
///     Arc::new(MemorySecureStore::new()),
/// )?;
///
/// let balances: serde_json::Value = client.get("/balances", None).await?;
/// println!("{balances}");
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
    tokens: TokenStore,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client with the default 15 second deadline.
    pub fn new(base_url: Url, secure_store: Arc<dyn SecureStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, secure_store, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request deadline.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be initialized (e.g. the
    /// TLS backend cannot be loaded).
    pub fn with_timeout(
        base_url: Url,
        secure_store: Arc<dyn SecureStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::unknown(format!("Failed to build HTTP client: {e}"), Some(e.into())))?;

        Ok(Self {
            base_url,
            client,
            tokens: TokenStore::new(secure_store),
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Stored access token. Never fails; an unreadable store yields `None`.
    pub async fn get_token(&self) -> Option<String> {
        self.tokens.access_token().await
    }

    /// Stored refresh token, with the same degrade-to-`None` rule.
    pub async fn get_refresh_token(&self) -> Option<String> {
        self.tokens.refresh_token().await
    }

    pub async fn set_token(&self, token: &str) -> Result<(), ApiError> {
        self.tokens.set_access_token(token).await
    }

    pub async fn set_refresh_token(&self, token: &str) -> Result<(), ApiError> {
        self.tokens.set_refresh_token(token).await
    }

    /// Forgets both tokens. Always completes, even if the store refuses.
    pub async fn clear_tokens(&self) {
        self.tokens.clear_all().await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Option<&QueryParams>) -> Result<T, ApiError> {
        self.request_with_headers(Method::GET, path, query, &(), HeaderMap::new())
            .await
    }

    /// Sends `body` as JSON. A body serializing to `null` (`&()`, `&None`) is omitted.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(Method::POST, path, None, body, HeaderMap::new())
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(Method::PUT, path, None, body, HeaderMap::new())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_with_headers(Method::DELETE, path, None, &(), HeaderMap::new())
            .await
    }

    /// General entry point behind the verbs.
    ///
    /// `headers` are applied after the default `Content-Type` and may replace
    /// it. The payload of a 2xx response is decoded into `T` as-is.
    pub async fn request_with_headers<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: &B,
        headers: HeaderMap,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let payload = self.execute(method, path, query, body, headers).await?;

        serde_json::from_value(payload).map_err(|e| {
            warn!(path = path, error:% = e; "Response payload did not match the expected shape");
            ApiError::unknown(format!("Unexpected response payload: {e}"), Some(e.into()))
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method.clone(), path, query, body, headers).await?;
        let url = request.url().clone();
        let start = Instant::now();

        // The elapsed timer is owned by the timeout future and dropped with it
        // on every exit path; dropping the inner future aborts the transport.
        let outcome = tokio::time::timeout(self.timeout, self.dispatch(request)).await;
        let latency = start.elapsed();

        match outcome {
            Ok(Ok((status, payload))) => {
                debug!(
                    method:% = method,
                    url:% = url,
                    status = status.as_u16(),
                    latency_ms = latency.as_millis() as u64;
                    "API request completed"
                );
                classify(status, payload)
            },
            Ok(Err(e)) => {
                warn!(method:% = method, url:% = url, kind:% = e.kind(), error:% = e; "API request failed");
                Err(e)
            },
            Err(_) => {
                warn!(
                    method:% = method,
                    url:% = url,
                    timeout_ms = self.timeout.as_millis() as u64;
                    "API request timed out"
                );
                Err(ApiError::timeout(self.timeout))
            },
        }
    }

    async fn dispatch(&self, request: reqwest::Request) -> Result<(reqwest::StatusCode, Value), ApiError> {
        let response = self.client.execute(request).await.map_err(ApiError::from_transport)?;
        let status = response.status();
        let payload = read_payload(response).await?;
        Ok((status, payload))
    }

    pub(crate) async fn build_request(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<reqwest::Request, ApiError> {
        let url = self.resolve_url(path, query)?;

        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for name in headers.keys() {
            merged.remove(name);
        }
        for (name, value) in headers.iter() {
            merged.append(name.clone(), value.clone());
        }

        if let Some(token) = self.tokens.access_token().await {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::unknown("Stored access token is not a valid header value", Some(e.into())))?;
            value.set_sensitive(true);
            merged.insert(AUTHORIZATION, value);
        }

        let mut builder = self.client.request(method, url).headers(merged);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|e| ApiError::unknown(format!("Could not build request: {e}"), Some(e.into())))
    }

    fn resolve_url(&self, path: &str, query: Option<&QueryParams>) -> Result<Url, ApiError> {
        let endpoint = match query {
            Some(query) => query.append_to(path),
            None => path.to_string(),
        };
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint);

        Url::parse(&raw).map_err(|e| ApiError::unknown(format!("Invalid request URL '{raw}': {e}"), Some(e.into())))
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Option<Vec<u8>>, ApiError> {
    let value = serde_json::to_value(body)
        .map_err(|e| ApiError::unknown(format!("Could not serialize request body: {e}"), Some(e.into())))?;

    if value.is_null() {
        return Ok(None);
    }

    serde_json::to_vec(&value)
        .map(Some)
        .map_err(|e| ApiError::unknown(format!("Could not serialize request body: {e}"), Some(e.into())))
}

fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Reads the response body into a JSON value.
///
/// JSON bodies that fail to decode become `null`. Other bodies are wrapped as
/// `{ "message": text }`; an empty non-JSON body is `null`.
async fn read_payload(response: reqwest::Response) -> Result<Value, ApiError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type);

    if is_json {
        let bytes = response.bytes().await.map_err(ApiError::from_body_read)?;
        return Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            debug!(error:% = e; "Response declared JSON but could not be decoded");
            Value::Null
        }));
    }

    let text = response.text().await.map_err(ApiError::from_body_read)?;
    if text.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(json!({ "message": text }))
    }
}

fn classify(status: reqwest::StatusCode, payload: Value) -> Result<Value, ApiError> {
    if status.is_success() {
        return Ok(payload);
    }

    let message = extract_message(&payload).unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    Err(ApiError::from_status(status.as_u16(), message))
}

fn extract_message(payload: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|field| payload.get(field).and_then(Value::as_str))
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
