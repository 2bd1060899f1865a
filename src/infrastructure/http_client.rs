//! HTTP transport for the catalog API
//!
//! Provides a dependency-injected client wrapper around reqwest that
//! attaches auth headers, normalizes response envelopes, classifies
//! failures and performs a bounded retry with exponential backoff.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::error::{ApiError, ApiResult};
use crate::infrastructure::config::ClientConfig;
use crate::infrastructure::token_store::TokenStore;

/// Documented response wrapper. Raw payloads are normalized into this
/// shape so consumers can rely on `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// Error block of the documented envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Per-request options.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    /// Attach the bearer token when one is held.
    pub requires_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            requires_auth: true,
        }
    }
}

impl RequestOptions {
    pub fn public() -> Self {
        Self {
            requires_auth: false,
        }
    }
}

/// Request body variants. Multipart bodies are rebuilt per attempt since a
/// form cannot be reused once sent; headers stay identical either way.
#[derive(Debug, Clone)]
pub enum RequestBody {
    None,
    Json(Value),
    /// File upload; the runtime sets the multipart content type and
    /// boundary, so no explicit content-type header is attached.
    Multipart {
        field: String,
        bytes: Vec<u8>,
        file_name: String,
    },
}

/// Server-side message pattern marking a 500 as a rejected-input failure
/// rather than a transient fault.
fn invalid_input_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)failed to convert value of type").expect("valid regex"))
}

/// Map a non-2xx status plus its extracted message into the error taxonomy.
pub fn classify_status(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        if invalid_input_pattern().is_match(&message) {
            return ApiError::InvalidInput { message };
        }
        return ApiError::ServerTransient {
            status: status.as_u16(),
            message,
        };
    }
    ApiError::Client {
        status: status.as_u16(),
        message,
    }
}

/// Map a reqwest failure into the error taxonomy.
pub fn classify_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_decode() {
        ApiError::malformed(err.to_string())
    } else {
        // connect/DNS/reset failures and anything else request-level
        ApiError::network(err.to_string())
    }
}

/// Extract a human message from a non-2xx body: `error.message`, then a
/// top-level `message`, then a generic status line.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    format!(
        "Error: {} - {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

/// Normalize a successful response body.
///
/// Bodies already in the documented envelope shape pass through; legacy
/// raw payloads are wrapped as `{success: true, data}`; empty bodies (204
/// and friends) become a bare success.
pub fn normalize_body<T: DeserializeOwned>(body: &str) -> ApiResult<Envelope<T>> {
    if body.trim().is_empty() {
        return Ok(Envelope {
            success: true,
            data: None,
            error: None,
        });
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::malformed(format!("invalid JSON response: {e}")))?;

    let is_envelope = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("success") || obj.contains_key("data"));

    if is_envelope {
        serde_json::from_value(value)
            .map_err(|e| ApiError::malformed(format!("envelope shape mismatch: {e}")))
    } else {
        let data: T = serde_json::from_value(value)
            .map_err(|e| ApiError::malformed(format!("payload shape mismatch: {e}")))?;
        Ok(Envelope {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

/// API client with auth header injection and bounded retry.
///
/// Constructed explicitly with its configuration and token store; no
/// global instance exists.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: Arc<TokenStore>) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Issue a request, retrying retryable failures with `2^attempt`
    /// second backoff, up to the configured extra attempts. Each resend
    /// carries identical headers and body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> ApiResult<Envelope<T>> {
        let url = format!("{}{}", self.config.base_url, path);
        let retries = self.config.transport_retries;

        for attempt in 0..=retries {
            match self
                .send_once(method.clone(), &url, &body, options)
                .await
            {
                Ok(envelope) => return Ok(envelope),
                Err(err) if err.is_retryable() && attempt < retries => {
                    let backoff = Duration::from_secs(1u64 << attempt);
                    warn!(
                        "🔄 Retrying {} {} in {:?} (attempt {}/{}): {}",
                        method,
                        path,
                        backoff,
                        attempt + 1,
                        retries,
                        err
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }

        // Loop always returns within the bound above
        Err(ApiError::malformed("retry loop exhausted"))
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &RequestBody,
        options: RequestOptions,
    ) -> ApiResult<Envelope<T>> {
        let mut builder = self.http.request(method, url);

        if options.requires_auth {
            if let Some(token) = self.tokens.access_token().await {
                builder = builder.bearer_auth(token);
            }
        }

        builder = match body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart {
                field,
                bytes,
                file_name,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone());
                builder.multipart(reqwest::multipart::Form::new().part(field.clone(), part))
            }
        };

        let response = builder.send().await.map_err(classify_transport)?;
        let status = response.status();
        let text = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            let message = extract_error_message(status, &text);
            return Err(classify_status(status, message));
        }

        debug!("{} -> {}", url, status);
        normalize_body(&text)
    }

    /// GET returning the envelope's data, if any.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        let envelope = self
            .request(Method::GET, path, RequestBody::None, RequestOptions::default())
            .await?;
        Ok(envelope.data)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<Option<T>> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::malformed(format!("unserializable body: {e}")))?;
        let envelope = self
            .request(Method::POST, path, RequestBody::Json(value), options)
            .await?;
        Ok(envelope.data)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Option<T>> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::malformed(format!("unserializable body: {e}")))?;
        let envelope = self
            .request(Method::PUT, path, RequestBody::Json(value), RequestOptions::default())
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request::<Value>(Method::DELETE, path, RequestBody::None, RequestOptions::default())
            .await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<Option<T>> {
        let envelope = self
            .request(
                Method::POST,
                path,
                RequestBody::Multipart {
                    field: field.to_string(),
                    bytes,
                    file_name: file_name.to_string(),
                },
                RequestOptions::default(),
            )
            .await?;
        Ok(envelope.data)
    }
}
