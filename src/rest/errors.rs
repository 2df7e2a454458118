//! Resource-specific error types.
//!
//! Resource operations add two failure modes on top of the request core:
//!
//! - [`ResourceError::Validation`]: a caller-supplied identifier is missing,
//!   or the record belongs to another vendor or fulfillment center
//! - [`ResourceError::UnexpectedResponse`]: Zoho answered 2xx without the
//!   expected envelope
//!
//! Everything else is a wrapped [`RestError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::rest::ResourceError;
//!
//! match PurchaseOrder::find(&client, "", &FindParams::default()).await {
//!     Err(ResourceError::Validation(e)) => println!("{} ({})", e.message, e.code),
//!     Err(e) => {
//!         let normalized = e.normalize();
//!         println!("{} ({})", normalized.message, normalized.code);
//!     }
//!     Ok(order) => println!("{:?}", order.purchaseorder_number),
//! }
//! ```

use crate::clients::{NormalizedError, RestError, INTERNAL_ERROR_CODE};
use thiserror::Error;

/// A caller-supplied identifier was missing or did not match the record.
///
/// ```rust
/// use zoho_inventory::rest::ValidationError;
///
/// let error = ValidationError::not_found("Order id is required");
/// assert_eq!(error.code, 404);
/// assert_eq!(error.to_string(), "Order id is required");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// HTTP-style status for the failure.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error with code 404.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: 404,
            message: message.into(),
        }
    }

    /// Creates a validation error with code 400.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: 400,
            message: message.into(),
        }
    }
}

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Missing or mismatched identifiers.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A success response without the expected envelope key.
    #[error("Unexpected response for {resource}: {message}")]
    UnexpectedResponse {
        /// The resource type name (e.g., "PurchaseOrder").
        resource: &'static str,
        /// What was missing or malformed.
        message: String,
    },

    /// An error from the REST client.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Returns the numeric code for this error.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Validation(e) => e.code,
            Self::UnexpectedResponse { .. } => INTERNAL_ERROR_CODE,
            Self::Rest(e) => e.code(),
        }
    }

    /// Collapses this error into a message and a numeric code.
    #[must_use]
    pub fn normalize(&self) -> NormalizedError {
        match self {
            Self::Validation(e) => NormalizedError::new(e.message.clone(), e.code),
            Self::UnexpectedResponse { .. } => {
                NormalizedError::new(self.to_string(), INTERNAL_ERROR_CODE)
            }
            Self::Rest(e) => e.normalize(),
        }
    }

    /// Returns `true` for a Zoho 404 or a not-found validation failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code() == 404
    }
}

impl From<ResourceError> for NormalizedError {
    fn from(error: ResourceError) -> Self {
        error.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiError, HttpError, TransportError};

    #[test]
    fn test_validation_error_keeps_code() {
        let error = ResourceError::from(ValidationError::not_found("Order id is required"));
        let normalized = error.normalize();

        assert_eq!(normalized.code, 404);
        assert_eq!(normalized.message, "Order id is required");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_unexpected_response_is_internal_error() {
        let error = ResourceError::UnexpectedResponse {
            resource: "Contact",
            message: "missing 'contact'".to_string(),
        };
        assert_eq!(error.code(), 500);
        assert!(error.to_string().contains("Contact"));
    }

    #[test]
    fn test_wrapped_rest_error_keeps_api_status() {
        let error = ResourceError::from(RestError::from(HttpError::Api(ApiError {
            code: 404,
            message: "not found".to_string(),
        })));
        assert_eq!(
            NormalizedError::from(error),
            NormalizedError::new("not found", 404)
        );
    }

    #[test]
    fn test_wrapped_transport_error_is_500() {
        let error = ResourceError::from(RestError::from(HttpError::Transport(TransportError {
            message: "connection refused".to_string(),
        })));
        assert_eq!(error.normalize().code, 500);
        assert!(!error.is_not_found());
    }
}
