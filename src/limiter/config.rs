//! Rate limit settings.

use std::time::Duration;

use crate::error::ConfigError;

/// Settings for one keyed token bucket.
///
/// The acquire timeout is not configurable: it is always three refill
/// intervals, so a caller fails instead of waiting indefinitely.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use zoho_inventory::limiter::RateLimitConfig;
///
/// let config = RateLimitConfig::new(2, Duration::from_millis(1000), 2).unwrap();
/// assert_eq!(config.timeout(), Duration::from_millis(3000));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    capacity: u32,
    refill_interval: Duration,
    refill_amount: u32,
    max_concurrent: Option<usize>,
}

impl RateLimitConfig {
    /// Tokens available at start and the bucket maximum (Zoho: 30 calls/minute).
    pub const DEFAULT_CAPACITY: u32 = 30;
    /// Interval between refills.
    pub const DEFAULT_REFILL_INTERVAL: Duration = Duration::from_secs(60);
    /// Tokens added per refill.
    pub const DEFAULT_REFILL_AMOUNT: u32 = 30;
    /// Acquire timeout as a multiple of the refill interval.
    pub const TIMEOUT_MULTIPLIER: u32 = 3;
    /// Longest accepted refill interval.
    pub const MAX_REFILL_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Creates a validated configuration without a concurrency bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRateLimit`] if any value is zero or
    /// `refill_interval` exceeds [`MAX_REFILL_INTERVAL`](Self::MAX_REFILL_INTERVAL).
    pub fn new(
        capacity: u32,
        refill_interval: Duration,
        refill_amount: u32,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "capacity must be greater than zero".to_string(),
            });
        }
        if refill_interval.is_zero() {
            return Err(ConfigError::InvalidRateLimit {
                reason: "refill interval must be greater than zero".to_string(),
            });
        }
        if refill_interval > Self::MAX_REFILL_INTERVAL {
            return Err(ConfigError::InvalidRateLimit {
                reason: format!(
                    "refill interval must not exceed {}s",
                    Self::MAX_REFILL_INTERVAL.as_secs()
                ),
            });
        }
        if refill_amount == 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "refill amount must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            capacity,
            refill_interval,
            refill_amount,
            max_concurrent: None,
        })
    }

    /// Bounds the number of simultaneously held permits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRateLimit`] if `max_concurrent` is zero.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Result<Self, ConfigError> {
        if max_concurrent == 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "max concurrent must be greater than zero".to_string(),
            });
        }
        self.max_concurrent = Some(max_concurrent);
        Ok(self)
    }

    /// Returns the bucket capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the refill interval.
    #[must_use]
    pub const fn refill_interval(&self) -> Duration {
        self.refill_interval
    }

    /// Returns the number of tokens added per refill.
    #[must_use]
    pub const fn refill_amount(&self) -> u32 {
        self.refill_amount
    }

    /// Returns the concurrency bound, if any.
    #[must_use]
    pub const fn max_concurrent(&self) -> Option<usize> {
        self.max_concurrent
    }

    /// Returns how long [`acquire`](super::RateLimiter::acquire) may wait.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.refill_interval * Self::TIMEOUT_MULTIPLIER
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            refill_interval: Self::DEFAULT_REFILL_INTERVAL,
            refill_amount: Self::DEFAULT_REFILL_AMOUNT,
            max_concurrent: None,
        }
    }
}

/// Partial override of the default [`RateLimitConfig`].
///
/// Unset fields keep their defaults.
///
/// ```rust
/// use zoho_inventory::limiter::{RateLimitConfig, RateLimitOptions};
///
/// let options = RateLimitOptions {
///     max_concurrent: Some(4),
///     ..Default::default()
/// };
/// let config = options.resolve().unwrap();
/// assert_eq!(config.capacity(), RateLimitConfig::DEFAULT_CAPACITY);
/// assert_eq!(config.max_concurrent(), Some(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimitOptions {
    /// Bucket capacity.
    pub capacity: Option<u32>,
    /// Interval between refills.
    pub refill_interval: Option<Duration>,
    /// Tokens added per refill.
    pub refill_amount: Option<u32>,
    /// Bound on simultaneously held permits.
    pub max_concurrent: Option<usize>,
}

impl RateLimitOptions {
    /// Merges these options over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRateLimit`] if a merged value is out of
    /// range.
    pub fn resolve(&self) -> Result<RateLimitConfig, ConfigError> {
        let defaults = RateLimitConfig::default();
        let config = RateLimitConfig::new(
            self.capacity.unwrap_or(defaults.capacity),
            self.refill_interval.unwrap_or(defaults.refill_interval),
            self.refill_amount.unwrap_or(defaults.refill_amount),
        )?;
        match self.max_concurrent {
            Some(max) => config.with_max_concurrent(max),
            None => Ok(config),
        }
    }
}
