//! Request descriptors for the Zoho Inventory API.
//!
//! An [`HttpRequest`] describes one call: method, path, optional JSON body,
//! query parameters and how to authenticate. It is built with
//! [`HttpRequest::builder`] and consumed by the request core.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Query parameter Zoho uses for the fulfillment center filter.
pub const FULFILLMENT_CENTER_PARAM: &str = "fulfillment_center_id";

/// Custom-field alias of [`FULFILLMENT_CENTER_PARAM`].
pub const FULFILLMENT_CENTER_CUSTOM_PARAM: &str = "cf_fulfillment_center_id";

/// HTTP methods used by the Inventory API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// How a request authenticates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// `Authorization: Bearer <token>` from the token manager.
    #[default]
    Bearer,
    /// No `Authorization` header. Only the token refresh call uses this.
    None,
}

/// Ordered query parameters whose values may be undefined.
///
/// A `None` value is kept while the request is assembled and dropped at
/// serialization, so callers can forward optional filters without checking
/// each one.
///
/// ```rust
/// use zoho_inventory::clients::QueryParams;
///
/// let mut query = QueryParams::new();
/// query.insert("vendor_id", "V1");
/// query.set("status", None::<String>);
/// query.insert("fulfillment_center_id", "FC1");
///
/// assert_eq!(
///     query.sanitized().to_query_string(),
///     "vendor_id=V1&fulfillment_center_id=FC1&cf_fulfillment_center_id=FC1"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, Option<String>)>);

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`, replacing an existing entry in place.
    pub fn set<V: Into<String>>(&mut self, key: impl Into<String>, value: Option<V>) {
        let key = key.into();
        let value = value.map(Into::into);
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Sets `key` to a defined value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, Some(value.into()));
    }

    /// Returns the defined value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns `true` if `key` is present, defined or not.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(existing, _)| existing == key)
    }

    /// Returns the number of entries, defined or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over defined entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
    }

    /// Returns a copy ready for the wire: undefined entries removed and a
    /// non-empty `fulfillment_center_id` mirrored as `cf_fulfillment_center_id`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut sanitized = Self(
            self.0
                .iter()
                .filter(|(_, value)| value.is_some())
                .cloned()
                .collect(),
        );

        let fulfillment_center = sanitized
            .get(FULFILLMENT_CENTER_PARAM)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if let Some(value) = fulfillment_center {
            sanitized.insert(FULFILLMENT_CENTER_CUSTOM_PARAM, value);
        }
        sanitized
    }

    /// Serializes defined entries as `key=value` pairs joined by `&`.
    ///
    /// Keys and values are percent-encoded, so names containing `&`, `=` or
    /// spaces survive the trip.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

/// A request to the Zoho Inventory API.
///
/// # Example
///
/// ```rust
/// use zoho_inventory::clients::{AuthMode, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get = HttpRequest::builder(HttpMethod::Get, "purchaseorders")
///     .query_param("vendor_id", "V1")
///     .build()
///     .unwrap();
/// assert_eq!(get.auth_mode, AuthMode::Bearer);
///
/// let put = HttpRequest::builder(HttpMethod::Put, "purchaseorders/1")
///     .body(json!({"ship_via": "DHL"}))
///     .build()
///     .unwrap();
/// assert!(put.body.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Path relative to the versioned API root, or an absolute URL.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters.
    pub query: QueryParams,
    /// How to authenticate.
    pub auth_mode: AuthMode,
}

impl HttpRequest {
    /// Creates a builder for the given method and path.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// POST without a body is allowed: Zoho's status transitions and the
    /// token refresh carry everything in the path or query.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is empty or a PUT has
    /// no body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        if self.http_method == HttpMethod::Put && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: QueryParams,
    auth_mode: AuthMode,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: QueryParams::new(),
            auth_mode: AuthMode::default(),
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Adds a defined query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Adds a query parameter that may be undefined.
    #[must_use]
    pub fn optional_query_param<V: Into<String>>(
        mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.query.set(key, value);
        self
    }

    /// Sets the authentication mode.
    #[must_use]
    pub const fn auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = auth_mode;
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            auth_mode: self.auth_mode,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_default_auth_mode_is_bearer() {
        let request = HttpRequest::builder(HttpMethod::Get, "contacts/1")
            .build()
            .unwrap();
        assert_eq!(request.auth_mode, AuthMode::Bearer);
    }

    #[test]
    fn test_undefined_params_are_dropped() {
        let mut query = QueryParams::new();
        query.insert("page", "2");
        query.set("vendor_id", None::<String>);

        let sanitized = query.sanitized();
        assert!(!sanitized.contains_key("vendor_id"));
        assert_eq!(sanitized.to_query_string(), "page=2");
    }

    #[test]
    fn test_fulfillment_center_is_mirrored_as_custom_field() {
        let query: QueryParams = [("fulfillment_center_id", "FC1")].into_iter().collect();
        let sanitized = query.sanitized();

        assert_eq!(sanitized.get("fulfillment_center_id"), Some("FC1"));
        assert_eq!(sanitized.get("cf_fulfillment_center_id"), Some("FC1"));
    }

    #[test]
    fn test_empty_or_undefined_fulfillment_center_is_not_mirrored() {
        let mut query = QueryParams::new();
        query.insert("fulfillment_center_id", "");
        assert!(!query.sanitized().contains_key("cf_fulfillment_center_id"));

        let mut query = QueryParams::new();
        query.set("fulfillment_center_id", None::<String>);
        assert!(query.sanitized().is_empty());
    }

    #[test]
    fn test_set_replaces_existing_entry_in_place() {
        let mut query = QueryParams::new();
        query.insert("a", "1");
        query.insert("b", "2");
        query.insert("a", "3");

        assert_eq!(query.len(), 2);
        assert_eq!(query.to_query_string(), "a=3&b=2");
    }

    #[test]
    fn test_reserved_characters_are_percent_encoded() {
        let query: QueryParams = [("contact_name", "Smith & Sons =1")].into_iter().collect();
        assert_eq!(
            query.to_query_string(),
            "contact_name=Smith%20%26%20Sons%20%3D1"
        );
    }

    #[test]
    fn test_put_requires_body() {
        let result = HttpRequest::builder(HttpMethod::Put, "purchaseorders/1").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_post_without_body_is_allowed() {
        let request = HttpRequest::builder(HttpMethod::Post, "purchaseorders/1/status/issued")
            .build()
            .unwrap();
        assert!(request.body.is_none());
        assert!(request.verify().is_ok());
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));
    }

    #[test]
    fn test_builder_with_body_and_optional_params() {
        let request = HttpRequest::builder(HttpMethod::Post, "contacts")
            .body(json!({"contact_name": "Acme"}))
            .optional_query_param("page", Some("1"))
            .optional_query_param("per_page", None::<String>)
            .auth_mode(AuthMode::None)
            .build()
            .unwrap();

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query.get("page"), Some("1"));
        assert_eq!(request.query.get("per_page"), None);
        assert_eq!(request.auth_mode, AuthMode::None);
    }
}
