//! Keyed registry of shared rate limiters.

use std::sync::Arc;

use dashmap::DashMap;

use crate::limiter::{RateLimitConfig, RateLimiter};

/// Maps a credential identity to its shared [`RateLimiter`].
///
/// The registry is an ordinary value owned by the application. Create one,
/// wrap it in an `Arc`, and hand it to every client that should share
/// buckets. Clients built with the same refresh token then draw from one
/// bucket; different refresh tokens get independent buckets.
///
/// A limiter's configuration is fixed when it is first created. Later lookups
/// with a different configuration keep the existing one and log a warning;
/// use [`reconfigure`](Self::reconfigure) to change a live limiter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use zoho_inventory::limiter::{RateLimitConfig, RateLimiterRegistry};
///
/// let registry = RateLimiterRegistry::new();
/// let a = registry.limiter("refresh-token", RateLimitConfig::default());
/// let b = registry.limiter("refresh-token", RateLimitConfig::default());
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct RateLimiterRegistry {
    limiters: DashMap<String, Arc<RateLimiter>>,
}

impl RateLimiterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the limiter for `key`, creating it with `config` on first use.
    pub fn limiter(&self, key: &str, config: RateLimitConfig) -> Arc<RateLimiter> {
        let limiter = self
            .limiters
            .entry(key.to_string())
            .or_insert_with(|| {
                tracing::debug!(
                    capacity = config.capacity(),
                    refill_interval_ms = config.refill_interval().as_millis(),
                    "Creating rate limiter"
                );
                Arc::new(RateLimiter::new(config))
            })
            .clone();

        if limiter.config() != config {
            tracing::warn!(
                "Ignoring rate limit settings for an existing limiter; use RateLimiterRegistry::reconfigure to change them"
            );
        }
        limiter
    }

    /// Returns the limiter for `key` if one has been created.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<RateLimiter>> {
        self.limiters.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Changes the configuration of the limiter for `key`.
    ///
    /// Creates the limiter if it does not exist yet. Every client sharing the
    /// key sees the new settings.
    pub async fn reconfigure(&self, key: &str, config: RateLimitConfig) {
        let existing = self.get(key);
        match existing {
            Some(limiter) => limiter.reconfigure(config).await,
            None => {
                self.limiter(key, config);
            }
        }
    }

    /// Returns the number of keys with a limiter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.limiters.len()
    }

    /// Returns `true` if no limiter has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limiters.is_empty()
    }
}
