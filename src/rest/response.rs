//! Response wrapper for resource operations.

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::ResourceError;

/// Pagination block Zoho attaches to list responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Current page, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Whether another page follows.
    #[serde(default)]
    pub has_more_page: bool,

    /// Name of the report the list belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_name: Option<String>,

    /// Filter applied to the list, e.g. `Status.All`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_filter: Option<String>,

    /// Column the list is sorted by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,

    /// `A` or `D`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

/// Data extracted from a Zoho response envelope, plus its metadata.
///
/// Implements `Deref<Target = T>` for transparent access to the data.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use zoho_inventory::rest::ResourceResponse;
///
/// let body = json!({
///     "code": 0,
///     "message": "success",
///     "items": [1, 2, 3],
///     "page_context": {"page": 1, "per_page": 3, "has_more_page": true}
/// });
///
/// let response: ResourceResponse<Vec<u32>> =
///     ResourceResponse::from_body(body, "items", "Item").unwrap();
/// assert_eq!(response.len(), 3);
/// assert!(response.has_more_page());
/// assert_eq!(response.message(), Some("success"));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    page_context: Option<PageContext>,
    message: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(data: T, page_context: Option<PageContext>, message: Option<String>) -> Self {
        Self {
            data,
            page_context,
            message,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns the pagination block, if Zoho sent one.
    #[must_use]
    pub const fn page_context(&self) -> Option<&PageContext> {
        self.page_context.as_ref()
    }

    /// Returns `true` if another page follows.
    #[must_use]
    pub fn has_more_page(&self) -> bool {
        self.page_context
            .as_ref()
            .is_some_and(|context| context.has_more_page)
    }

    /// Returns Zoho's top-level `message`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Maps the data, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            page_context: self.page_context,
            message: self.message,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Extracts the data stored under `key` in a Zoho response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the key is missing or
    /// its value does not deserialize into `T`.
    pub fn from_body(body: Value, key: &str, resource: &'static str) -> Result<Self, ResourceError> {
        let Value::Object(mut envelope) = body else {
            return Err(ResourceError::UnexpectedResponse {
                resource,
                message: "response body is not an object".to_string(),
            });
        };

        let data_value = envelope
            .remove(key)
            .ok_or_else(|| ResourceError::UnexpectedResponse {
                resource,
                message: format!("missing '{key}' in response body"),
            })?;
        let data: T =
            serde_json::from_value(data_value).map_err(|e| ResourceError::UnexpectedResponse {
                resource,
                message: format!("failed to deserialize '{key}': {e}"),
            })?;

        let page_context = envelope
            .remove("page_context")
            .and_then(|value| serde_json::from_value(value).ok());
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Ok(Self {
            data,
            page_context,
            message,
        })
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

/// Extracts Zoho's top-level `message` from a response body.
pub(crate) fn response_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct TestContact {
        contact_id: String,
    }

    #[test]
    fn test_from_body_extracts_data_and_message() {
        let body = json!({
            "code": 0,
            "message": "success",
            "contact": {"contact_id": "460000000026049"}
        });
        let response: ResourceResponse<TestContact> =
            ResourceResponse::from_body(body, "contact", "Contact").unwrap();

        assert_eq!(response.contact_id, "460000000026049");
        assert_eq!(response.message(), Some("success"));
        assert!(response.page_context().is_none());
        assert!(!response.has_more_page());
    }

    #[test]
    fn test_from_body_parses_page_context() {
        let body = json!({
            "contacts": [],
            "page_context": {
                "page": 2,
                "per_page": 200,
                "has_more_page": false,
                "sort_column": "created_time",
                "sort_order": "D"
            }
        });
        let response: ResourceResponse<Vec<TestContact>> =
            ResourceResponse::from_body(body, "contacts", "Contact").unwrap();

        let context = response.page_context().unwrap();
        assert_eq!(context.page, Some(2));
        assert_eq!(context.per_page, Some(200));
        assert_eq!(context.sort_order.as_deref(), Some("D"));
    }

    #[test]
    fn test_from_body_missing_key_is_unexpected_response() {
        let result: Result<ResourceResponse<TestContact>, _> =
            ResourceResponse::from_body(json!({"code": 0}), "contact", "Contact");
        assert!(matches!(
            result,
            Err(ResourceError::UnexpectedResponse { resource: "Contact", message })
                if message.contains("'contact'")
        ));
    }

    #[test]
    fn test_from_body_wrong_shape_is_unexpected_response() {
        let result: Result<ResourceResponse<TestContact>, _> =
            ResourceResponse::from_body(json!({"contact": 42}), "contact", "Contact");
        assert!(matches!(result, Err(ResourceError::UnexpectedResponse { .. })));

        let result: Result<ResourceResponse<TestContact>, _> =
            ResourceResponse::from_body(json!([]), "contact", "Contact");
        assert!(matches!(result, Err(ResourceError::UnexpectedResponse { .. })));
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = ResourceResponse::new(vec![1, 2], None, Some("ok".to_string()));
        let mapped = response.map(|items| items.len());
        assert_eq!(*mapped, 2);
        assert_eq!(mapped.message(), Some("ok"));
    }

    #[test]
    fn test_response_message_defaults_to_empty() {
        assert_eq!(response_message(&json!({"message": "done"})), "done");
        assert_eq!(response_message(&json!({})), "");
    }
}
