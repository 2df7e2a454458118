//! HTTP client types for Zoho Inventory API communication.
//!
//! This module holds the rate-limited, token-refreshing request core that
//! every resource goes through.
//!
//! # Overview
//!
//! - [`HttpClient`]: the request core (auth header, query, limiter, parsing)
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`AuthMode`]: bearer token or no authentication
//! - [`QueryParams`]: ordered query parameters whose values may be undefined
//! - [`rest::RestClient`]: versioned API root plus `organization_id`
//! - [`HttpError`] and [`NormalizedError`]: the error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::clients::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "purchaseorders")
//!     .optional_query_param("vendor_id", vendor_id)
//!     .build()?;
//!
//! let body = rest_client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Every request is attempted once; failures are classified
//! and returned to the caller.

mod errors;
pub(crate) mod http_client;
mod http_request;
pub mod rest;

pub use errors::{
    classify_error, ApiError, AuthError, HttpError, InvalidHttpRequestError, NormalizedError,
    RateLimitTimeoutError, TransportError, INTERNAL_ERROR_CODE, RATE_LIMITED_CODE,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    AuthMode, HttpMethod, HttpRequest, HttpRequestBuilder, QueryParams,
    FULFILLMENT_CENTER_CUSTOM_PARAM, FULFILLMENT_CENTER_PARAM,
};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};
