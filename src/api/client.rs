//! HTTP gateway to the catalog API.
//!
//! Every call is a GET against a fixed base URL. Successful responses are
//! wrapped in a `{ "success": true, "data": ... }` envelope which is peeled
//! off here; everything else collapses into a single human-readable
//! [`ApiError`] so callers never see status codes or transport details.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://podo.b1.ma/api/public";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const FALLBACK_MESSAGE: &str = "An error occurred";

/// Where an [`ApiError`] came from. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The HTTP client could not be built.
    Setup,
    /// Connection refused, DNS failure, body read failure.
    Network,
    /// The request exceeded the client timeout.
    Timeout,
    /// The server answered with a non-2xx status.
    Status,
    /// The body was not the JSON shape we expected.
    Format,
}

/// A normalized API failure: one display message, nothing else leaks upward.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::new(
                ApiErrorKind::Timeout,
                format!("timeout of {}ms exceeded", timeout.as_millis()),
            )
        } else {
            Self::new(ApiErrorKind::Network, err.to_string())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Stateless GET client bound to one base URL.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::new(ApiErrorKind::Setup, e.to_string()))?;
        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue `GET {base_url}{path}` and return the unwrapped payload.
    pub async fn request(&self, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;

        if !status.is_success() {
            warn!("GET {} failed: HTTP {} ({} bytes)", path, status.as_u16(), body.len());
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| server_message(&v))
                .unwrap_or_else(|| {
                    format!("Request failed with status code {}", status.as_u16())
                });
            return Err(ApiError::new(ApiErrorKind::Status, message));
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            warn!("GET {} returned a non-JSON body: {}", path, e);
            ApiError::new(ApiErrorKind::Format, "Invalid API response format")
        })?;

        debug!("GET {} -> {} ({} bytes)", path, status.as_u16(), body.len());
        Ok(unwrap_envelope(value))
    }

    /// Request a list payload. A `null` payload is an empty list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let payload = self.request(path).await?;
        if payload.is_null() {
            return Ok(Vec::new());
        }
        decode(path, payload)
    }

    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let payload = self.request(path).await?;
        decode(path, payload)
    }
}

fn decode<T: DeserializeOwned>(path: &str, payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| {
        warn!("Unexpected payload shape from {}: {}", path, e);
        ApiError::new(ApiErrorKind::Format, "Invalid API response format")
    })
}

/// Peel `{ success: true, data }`. Any other shape passes through untouched.
pub fn unwrap_envelope(value: Value) -> Value {
    if let Value::Object(ref map) = value
        && map.get("success").and_then(Value::as_bool) == Some(true)
        && let Some(data) = map.get("data")
    {
        return data.clone();
    }
    value
}

/// The `message` field of an error body, if the server sent one.
fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
