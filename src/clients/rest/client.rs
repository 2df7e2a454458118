//! REST client for the Zoho Inventory API.

use serde_json::Value;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, QueryParams};
use crate::config::{OrganizationId, ZohoConfig};
use crate::limiter::RateLimiterRegistry;

/// Versioned API root appended to the configured host.
pub const API_ROOT: &str = "/api/v1";

/// Query parameter carrying the organization id.
pub const ORGANIZATION_PARAM: &str = "organization_id";

/// REST client for the Zoho Inventory API.
///
/// Resolves paths against `<host>/api/v1/`, adds `organization_id` to every
/// request when one is configured, and hands the request to the
/// [`HttpClient`] core.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use zoho_inventory::{RestClient, ZohoConfig};
/// use zoho_inventory::limiter::RateLimiterRegistry;
///
/// let config = ZohoConfig::from_env()?;
/// let registry = Arc::new(RateLimiterRegistry::new());
/// let client = RestClient::new(&config, &registry)?;
///
/// let orders = client.get("purchaseorders", None).await?;
/// let contact = client
///     .post("contacts", Some(serde_json::json!({"contact_name": "Acme"})), None)
///     .await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: String,
    organization_id: Option<OrganizationId>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a REST client for `config`.
    ///
    /// The client's rate limiter comes from `registry`, keyed by the refresh
    /// token. Pass the same registry to every client in the process.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: &ZohoConfig, registry: &RateLimiterRegistry) -> Result<Self, RestError> {
        let http_client = HttpClient::new(config, registry)?;
        Ok(Self {
            http_client,
            base_url: format!("{}{API_ROOT}", config.api_base_url()),
            organization_id: config.organization_id().cloned(),
        })
    }

    /// Returns the versioned API root, e.g. `https://inventory.zoho.com/api/v1`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the organization id added to every request.
    #[must_use]
    pub const fn organization_id(&self) -> Option<&OrganizationId> {
        self.organization_id.as_ref()
    }

    /// Returns the request core.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a request whose path is relative to the API root.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty after
    /// normalization, or [`RestError::Http`] for failures of the core.
    pub async fn request(&self, mut request: HttpRequest) -> Result<Value, RestError> {
        let path = normalize_path(&request.path)?;
        if let Some(organization_id) = &self.organization_id {
            request
                .query
                .insert(ORGANIZATION_PARAM, organization_id.to_string());
        }

        let url = format!("{}/{path}", self.base_url);
        request.path = path;
        self.http_client
            .execute(&url, request)
            .await
            .map_err(Into::into)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, path: &str, query: Option<QueryParams>) -> Result<Value, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request. Zoho status transitions post without a body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Result<Value, RestError> {
        self.make_request(HttpMethod::Post, path, body, query).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(
        &self,
        path: &str,
        body: Value,
        query: Option<QueryParams>,
    ) -> Result<Value, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(&self, path: &str, query: Option<QueryParams>) -> Result<Value, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Result<Value, RestError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(query) = query {
            builder = builder.query(query);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;
        self.request(request).await
    }
}

/// Strips leading and trailing slashes; an empty result is an error.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
