//! The rate-limited, token-refreshing request core.
//!
//! [`HttpClient`] turns an [`HttpRequest`] into one HTTP call:
//!
//! 1. hold a permit from the shared [`RateLimiter`] for the duration of the call
//! 2. resolve the `Authorization` header from the [`TokenManager`]
//! 3. sanitize and serialize the query
//! 4. parse the JSON body and classify failures
//!
//! Token refreshes go through the transport directly and never take a permit.
//!
//! Nothing is retried.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;

use crate::auth::TokenManager;
use crate::clients::errors::{ApiError, HttpError, TransportError};
use crate::clients::http_request::{AuthMode, HttpMethod, HttpRequest};
use crate::config::ZohoConfig;
use crate::limiter::{RateLimiter, RateLimiterRegistry};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A `reqwest` client plus the headers every call carries.
///
/// Shared by the request core and its token manager. Cloning is cheap.
#[derive(Clone, Debug)]
pub(crate) struct Transport {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
}

impl Transport {
    fn new(config: &ZohoConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Zoho Inventory Rust Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| TransportError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Sends one request to `url` and parses the response.
    ///
    /// `bearer` becomes the `Authorization` header when present.
    pub(crate) async fn send(
        &self,
        url: &str,
        request: &HttpRequest,
        bearer: Option<&str>,
    ) -> Result<Value, HttpError> {
        let url = append_query(url, &request.query.sanitized().to_query_string());

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(token) = bearer {
            req_builder = req_builder.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let res = req_builder.send().await?;
        let status = res.status();
        let body_text = res.text().await?;

        if status.is_success() {
            return parse_success_body(status, &body_text);
        }

        let error = ApiError {
            code: status.as_u16(),
            message: error_message(status, &body_text),
        };
        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            code = error.code,
            "Zoho request failed"
        );
        Err(error.into())
    }
}

fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

fn parse_success_body(status: StatusCode, body_text: &str) -> Result<Value, HttpError> {
    if body_text.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(body_text).map_err(|e| HttpError::Decode {
        status: status.as_u16(),
        message: e.to_string(),
    })
}

/// Picks the vendor's `error.message`, then `message`, then the reason phrase.
fn error_message(status: StatusCode, body_text: &str) -> String {
    let body: Value = serde_json::from_str(body_text).unwrap_or(Value::Null);
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Rate-limited, token-refreshing HTTP client for Zoho.
///
/// Every client owns its own token cache. The rate limiter is looked up in a
/// [`RateLimiterRegistry`] under the client's refresh token, so clients built
/// with the same credentials share one bucket.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use zoho_inventory::clients::{HttpClient, HttpMethod, HttpRequest};
/// use zoho_inventory::limiter::RateLimiterRegistry;
/// use zoho_inventory::ZohoConfig;
///
/// let config = ZohoConfig::from_env()?;
/// let registry = Arc::new(RateLimiterRegistry::new());
/// let client = HttpClient::new(&config, &registry)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "contacts").build()?;
/// let body = client
///     .execute("https://inventory.zoho.com/api/v1/contacts", request)
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    transport: Transport,
    tokens: TokenManager,
    limiter: Arc<RateLimiter>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `config`, drawing its limiter from `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the TLS backend cannot be set up.
    pub fn new(config: &ZohoConfig, registry: &RateLimiterRegistry) -> Result<Self, HttpError> {
        let transport = Transport::new(config)?;
        let credentials = config.credentials().clone();
        let limiter = registry.limiter(
            credentials.refresh_token().as_ref(),
            *config.rate_limit(),
        );
        let tokens = TokenManager::new(credentials, config.token_url().to_string(), transport.clone());

        Ok(Self {
            transport,
            tokens,
            limiter,
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.transport.default_headers
    }

    /// Returns the token manager that supplies bearer tokens.
    #[must_use]
    pub const fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Returns the rate limiter this client draws from.
    #[must_use]
    pub const fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Sends `request` to the absolute `url`.
    ///
    /// A successful response yields its parsed JSON body, or `{}` when the
    /// body is empty.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] if the request fails validation
    /// - [`HttpError::Auth`] if the bearer token cannot be refreshed
    /// - [`HttpError::RateLimitTimeout`] if no permit is obtained in time
    /// - [`HttpError::Api`] for a non-success status
    /// - [`HttpError::Transport`] for network failures
    /// - [`HttpError::Decode`] for a success body that is not JSON
    pub async fn execute(&self, url: &str, request: HttpRequest) -> Result<Value, HttpError> {
        request.verify()?;

        let _permit = self.limiter.acquire().await?;
        let token = match request.auth_mode {
            AuthMode::Bearer => Some(self.tokens.valid_token().await?),
            AuthMode::None => None,
        };
        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            "Sending Zoho request"
        );
        self.transport
            .send(url, &request, token.as_ref().map(|token| token.value()))
            .await
    }
}
