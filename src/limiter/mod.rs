//! Outbound request rate limiting.
//!
//! Zoho enforces a per-account call quota. This module provides:
//!
//! - [`RateLimitConfig`]: settings for one token bucket
//! - [`RateLimitOptions`]: a partial override merged over the defaults
//! - [`RateLimiter`]: a token bucket with FIFO queuing and an acquire timeout
//! - [`RateLimitPermit`]: the scoped proof of a consumed token
//! - [`RateLimiterRegistry`]: shares one limiter per credential identity
//!
//! # Sharing
//!
//! Two clients built from the same refresh token must not exceed the quota
//! together, so the registry hands them the same [`RateLimiter`]. The
//! registry is the only shared mutable state in the crate; token caches stay
//! per client.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use zoho_inventory::limiter::{RateLimitConfig, RateLimiterRegistry};
//!
//! let registry = Arc::new(RateLimiterRegistry::new());
//! let limiter = registry.limiter("refresh-token", RateLimitConfig::default());
//!
//! let permit = limiter.acquire().await?;
//! // ... send the request ...
//! drop(permit);
//! ```

mod bucket;
mod config;
mod registry;

pub use bucket::{RateLimitPermit, RateLimiter};
pub use config::{RateLimitConfig, RateLimitOptions};
pub use registry::RateLimiterRegistry;
