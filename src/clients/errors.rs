//! Error types for the HTTP request core.
//!
//! - [`ApiError`]: non-success HTTP status from the Inventory API
//! - [`AuthError`]: the token endpoint rejected the credentials
//! - [`RateLimitTimeoutError`]: no rate limit permit within the timeout
//! - [`TransportError`]: DNS, connection or I/O failure
//! - [`InvalidHttpRequestError`]: the request failed validation before sending
//! - [`HttpError`]: unified error for all of the above
//! - [`NormalizedError`]: message plus a numeric code, for surrounding services
//!
//! Nothing here is retried. Every failure reaches the caller once.
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::clients::HttpError;
//!
//! match client.get("purchaseorders", None).await {
//!     Ok(body) => println!("{body}"),
//!     Err(HttpError::Api(e)) => println!("Zoho said {}: {}", e.code, e.message),
//!     Err(e) => {
//!         let normalized = e.normalize();
//!         println!("{} ({})", normalized.message, normalized.code);
//!     }
//! }
//! ```

use std::time::Duration;

use thiserror::Error;

/// Synthetic code for failures that carry no HTTP status.
pub const INTERNAL_ERROR_CODE: u16 = 500;

/// Code reported for rate limit timeouts.
pub const RATE_LIMITED_CODE: u16 = 429;

/// A non-success HTTP response from the Inventory API.
///
/// The message is the vendor's `error.message` or top-level `message`
/// field, falling back to the status reason phrase.
///
/// ```rust
/// use zoho_inventory::clients::ApiError;
///
/// let error = ApiError { code: 404, message: "not found".to_string() };
/// assert_eq!(error.to_string(), "not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The vendor's error message.
    pub message: String,
}

/// The OAuth token endpoint rejected the refresh request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Token refresh failed with status {code}: {message}")]
pub struct AuthError {
    /// HTTP status of the token response (401 when Zoho answered 200 with an error body).
    pub code: u16,
    /// The provider's error message.
    pub message: String,
}

/// No rate limit permit was obtained before the timeout elapsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Rate limit permit not obtained within {timeout:?}")]
pub struct RateLimitTimeoutError {
    /// How long the caller waited.
    pub timeout: Duration,
}

/// A network-level failure: DNS, refused connection, reset, TLS.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Network error: {message}")]
pub struct TransportError {
    /// Description of the underlying failure.
    pub message: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

/// The request failed validation before it was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// A PUT request was made without a body. POST may omit one.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for the request core.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-success HTTP response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Token refresh was rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The rate limiter timed out.
    #[error(transparent)]
    RateLimitTimeout(#[from] RateLimitTimeoutError),

    /// Network or connection error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A success response whose body was not valid JSON.
    #[error("Could not decode response body (status {status}): {message}")]
    Decode {
        /// The HTTP status of the response.
        status: u16,
        /// The parser error.
        message: String,
    },
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.into())
    }
}

impl HttpError {
    /// Returns the numeric code for this error.
    ///
    /// API and auth errors carry their HTTP status, rate limit timeouts map to
    /// 429, invalid requests to 400, and everything without a status to 500.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Api(e) => e.code,
            Self::Auth(e) => e.code,
            Self::RateLimitTimeout(_) => RATE_LIMITED_CODE,
            Self::InvalidRequest(_) => 400,
            Self::Transport(_) | Self::Decode { .. } => INTERNAL_ERROR_CODE,
        }
    }

    /// Collapses this error into a message and a numeric code.
    #[must_use]
    pub fn normalize(&self) -> NormalizedError {
        let message = match self {
            Self::Api(e) => e.message.clone(),
            other => other.to_string(),
        };
        NormalizedError::new(message, self.code())
    }
}

/// An error reduced to a human-readable message and an HTTP-style code.
///
/// Surrounding services can map `code` straight to a response status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NormalizedError {
    /// Human-readable message.
    pub message: String,
    /// HTTP status, or 500 when the failure had none.
    pub code: u16,
}

impl NormalizedError {
    /// Creates a normalized error. A code outside `100..=599` becomes 500.
    #[must_use]
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        let code = if (100..=599).contains(&code) {
            code
        } else {
            INTERNAL_ERROR_CODE
        };
        Self {
            message: message.into(),
            code,
        }
    }
}

impl From<&HttpError> for NormalizedError {
    fn from(error: &HttpError) -> Self {
        error.normalize()
    }
}

impl From<HttpError> for NormalizedError {
    fn from(error: HttpError) -> Self {
        error.normalize()
    }
}

/// Classifies a request core failure.
///
/// Equivalent to [`HttpError::normalize`]; provided as a free function for
/// resource modules that map errors in `map_err` chains.
#[must_use]
pub fn classify_error(error: &HttpError) -> NormalizedError {
    error.normalize()
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<NormalizedError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_status_and_message() {
        let error = HttpError::Api(ApiError {
            code: 404,
            message: "not found".to_string(),
        });
        let normalized = classify_error(&error);

        assert_eq!(normalized.code, 404);
        assert_eq!(normalized.message, "not found");
    }

    #[test]
    fn test_transport_error_normalizes_to_500() {
        let error = HttpError::Transport(TransportError {
            message: "connection refused".to_string(),
        });
        let normalized = error.normalize();

        assert_eq!(normalized.code, 500);
        assert!(normalized.message.contains("connection refused"));
    }

    #[test]
    fn test_rate_limit_timeout_normalizes_to_429() {
        let error = HttpError::from(RateLimitTimeoutError {
            timeout: Duration::from_secs(3),
        });
        assert_eq!(error.code(), 429);
        assert!(error.to_string().contains("3s"));
    }

    #[test]
    fn test_auth_error_keeps_provider_status() {
        let error = HttpError::from(AuthError {
            code: 401,
            message: "invalid_code".to_string(),
        });
        let normalized = NormalizedError::from(&error);

        assert_eq!(normalized.code, 401);
        assert!(normalized.message.contains("invalid_code"));
    }

    #[test]
    fn test_decode_error_normalizes_to_500() {
        let error = HttpError::Decode {
            status: 200,
            message: "expected value".to_string(),
        };
        assert_eq!(error.code(), 500);
    }

    #[test]
    fn test_normalized_error_rejects_non_http_codes() {
        assert_eq!(NormalizedError::new("odd", 0).code, 500);
        assert_eq!(NormalizedError::new("odd", 1000).code, 500);
        assert_eq!(NormalizedError::new("fine", 422).code, 422);
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
        assert_eq!(HttpError::from(error).code(), 400);
    }
}
