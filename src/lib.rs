//! # Zoho Inventory Rust Client
//!
//! An async client for the Zoho Inventory REST API, with OAuth token refresh
//! and per-account rate limiting.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ZohoConfig`] and [`ZohoConfigBuilder`]
//! - Validated newtypes for OAuth credentials and the organization id
//! - Access tokens obtained from the refresh token and cached until expiry
//! - A token bucket per account, shared by every client built from the same
//!   [`RateLimiterRegistry`]
//! - Purchase order and contact resources in [`rest::resources`]
//! - Errors that collapse into a message and an HTTP-style code via
//!   [`NormalizedError`]
//!
//! ## Quick Start
//!
//! ```rust
//! use zoho_inventory::{ClientId, ClientSecret, OrganizationId, RefreshToken, ZohoConfig};
//!
//! let config = ZohoConfig::builder()
//!     .client_id(ClientId::new("1000.CLIENT").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .refresh_token(RefreshToken::new("1000.refresh").unwrap())
//!     .organization_id(OrganizationId::new("10234695").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use zoho_inventory::{RateLimiterRegistry, RestClient, ZohoConfig};
//! use zoho_inventory::rest::resources::{FindParams, PurchaseOrder};
//!
//! let config = ZohoConfig::from_env()?;
//! let registry = RateLimiterRegistry::new();
//! let client = RestClient::new(&config, &registry)?;
//!
//! let order = PurchaseOrder::find(&client, "460000000039131", &FindParams::default()).await?;
//! println!("{:?}", order.normalized_status());
//!
//! // Raw access for endpoints without a typed resource
//! let items = client.get("items", None).await?;
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use zoho_inventory::NormalizedError;
//!
//! if let Err(e) = PurchaseOrder::find(&client, id, &FindParams::default()).await {
//!     let normalized = NormalizedError::from(e);
//!     eprintln!("{} ({})", normalized.message, normalized.code);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and the limiter registry are passed explicitly
//! - **Fail-fast validation**: newtypes and rate limit settings validate on construction
//! - **Thread-safe**: all client types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No automatic retries**: failures are classified and returned

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod limiter;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    ClientId, ClientSecret, Credentials, DataCenter, OrganizationId, RefreshToken, ZohoConfig,
    ZohoConfigBuilder,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    AuthMode, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    NormalizedError, QueryParams, RestClient, RestError,
};
pub use limiter::{RateLimitConfig, RateLimitOptions, RateLimiter, RateLimiterRegistry};

pub use auth::{AccessToken, TokenManager};
pub use rest::{ResourceError, ResourceResponse, ValidationError};
