//! OAuth token handling for Zoho.
//!
//! Zoho self-client integrations hold a long-lived refresh token and trade it
//! for short-lived access tokens at the accounts server. This module provides:
//!
//! - [`AccessToken`]: a bearer token with its expiry instant
//! - [`AccessTokenResponse`]: the token endpoint's response body
//! - [`TokenManager`]: caches one client's token and refreshes it on demand
//!
//! The [`TokenManager`] is created by [`HttpClient`](crate::clients::HttpClient)
//! and reached through [`HttpClient::token_manager`](crate::clients::HttpClient::token_manager).
//!
//! # Example
//!
//! ```rust,ignore
//! let token = client.token_manager().valid_token().await?;
//! println!("expires at {}", token.expires_at());
//! ```

mod token;
mod token_manager;

pub use token::{AccessToken, AccessTokenResponse, DEFAULT_EXPIRES_IN_SECS};
pub use token_manager::TokenManager;
