//! Token bucket with FIFO queuing, a concurrency bound and an acquire timeout.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::{self, Instant};

use crate::clients::RateLimitTimeoutError;
use crate::limiter::RateLimitConfig;

/// Mutable bucket state. Guarded by a fair mutex, so waiters are admitted in
/// arrival order.
#[derive(Debug)]
struct Bucket {
    tokens: u32,
    last_refill: Instant,
    concurrency: Option<Arc<Semaphore>>,
}

impl Bucket {
    fn new(config: &RateLimitConfig) -> Self {
        Self {
            tokens: config.capacity(),
            last_refill: Instant::now(),
            concurrency: config.max_concurrent().map(|max| Arc::new(Semaphore::new(max))),
        }
    }

    /// Adds `refill_amount` for every whole interval elapsed since the last
    /// refill, capped at capacity.
    fn refill(&mut self, now: Instant, config: &RateLimitConfig) {
        let interval = config.refill_interval();
        let elapsed = now.saturating_duration_since(self.last_refill);
        let ticks = elapsed.as_nanos() / interval.as_nanos();
        if ticks == 0 {
            return;
        }

        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        let added = u64::from(config.refill_amount()) * u64::from(ticks);
        let refilled = (u64::from(self.tokens) + added).min(u64::from(config.capacity()));
        self.tokens = u32::try_from(refilled).unwrap_or_else(|_| config.capacity());
        self.last_refill = interval
            .checked_mul(ticks)
            .map_or(now, |advance| self.last_refill + advance);
    }

    /// Takes one token, or returns the instant of the next refill.
    fn try_take(&mut self, now: Instant, config: &RateLimitConfig) -> Result<(), Instant> {
        self.refill(now, config);
        if self.tokens > 0 {
            self.tokens -= 1;
            Ok(())
        } else {
            Err(self.last_refill + config.refill_interval())
        }
    }
}

/// A token bucket rate limiter for one credential identity.
///
/// Every call to [`acquire`](Self::acquire) consumes one token. When the
/// bucket is empty the caller waits, in FIFO order, for the next refill.
/// A caller that cannot obtain a permit within
/// [`RateLimitConfig::timeout`] fails with [`RateLimitTimeoutError`].
///
/// Limiters are usually obtained from a
/// [`RateLimiterRegistry`](super::RateLimiterRegistry) so that every client
/// using the same credentials shares one bucket.
///
/// # Example
///
/// ```rust,ignore
/// use zoho_inventory::limiter::{RateLimitConfig, RateLimiter};
///
/// let limiter = RateLimiter::new(RateLimitConfig::default());
/// let _permit = limiter.acquire().await?;
/// // make the call while the permit is held
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    config: RwLock<RateLimitConfig>,
    bucket: Mutex<Bucket>,
}

// Verify RateLimiter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateLimiter>();
    assert_send_sync::<RateLimitPermit>();
};

impl RateLimiter {
    /// Creates a limiter with a full bucket.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            bucket: Mutex::new(Bucket::new(&config)),
            config: RwLock::new(config),
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> RateLimitConfig {
        *self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits for a token (and a concurrency slot, when bounded).
    ///
    /// The returned permit holds the concurrency slot until dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitTimeoutError`] if no permit is obtained within
    /// [`RateLimitConfig::timeout`]. A token taken before a concurrency
    /// timeout is not returned to the bucket.
    pub async fn acquire(&self) -> Result<RateLimitPermit, RateLimitTimeoutError> {
        let timeout = self.config().timeout();
        time::timeout(timeout, self.wait_for_permit())
            .await
            .map_err(|_| {
                tracing::warn!(
                    timeout_ms = timeout.as_millis(),
                    "Rate limit permit not obtained in time"
                );
                RateLimitTimeoutError { timeout }
            })
    }

    /// Takes a permit only if one is available right now.
    ///
    /// Returns `None` when the bucket is empty, the concurrency bound is
    /// reached, or other callers are already queued.
    pub fn try_acquire(&self) -> Option<RateLimitPermit> {
        let mut bucket = self.bucket.try_lock().ok()?;
        let config = self.config();
        let permit = match &bucket.concurrency {
            Some(semaphore) => Some(Arc::clone(semaphore).try_acquire_owned().ok()?),
            None => None,
        };
        bucket.try_take(Instant::now(), &config).ok()?;
        Some(RateLimitPermit { _permit: permit })
    }

    /// Returns the number of tokens available right now.
    pub async fn available_tokens(&self) -> u32 {
        let config = self.config();
        let mut bucket = self.bucket.lock().await;
        bucket.refill(Instant::now(), &config);
        bucket.tokens
    }

    /// Replaces the configuration of a live limiter.
    ///
    /// Tokens above the new capacity are dropped. A changed concurrency bound
    /// applies to permits acquired afterwards.
    pub(crate) async fn reconfigure(&self, config: RateLimitConfig) {
        let previous = {
            let mut current = self.config.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, config)
        };

        let mut bucket = self.bucket.lock().await;
        bucket.tokens = bucket.tokens.min(config.capacity());
        if previous.max_concurrent() != config.max_concurrent() {
            bucket.concurrency = config
                .max_concurrent()
                .map(|max| Arc::new(Semaphore::new(max)));
        }
    }

    async fn wait_for_permit(&self) -> RateLimitPermit {
        let semaphore = {
            let mut bucket = self.bucket.lock().await;
            loop {
                let config = self.config();
                match bucket.try_take(Instant::now(), &config) {
                    Ok(()) => break bucket.concurrency.clone(),
                    Err(next_refill) => {
                        tracing::debug!(
                            wait_ms = next_refill
                                .saturating_duration_since(Instant::now())
                                .as_millis(),
                            "Rate limited, waiting for refill"
                        );
                        time::sleep_until(next_refill).await;
                    }
                }
            }
        };

        let permit = match semaphore {
            Some(semaphore) => semaphore.acquire_owned().await.ok(),
            None => None,
        };
        RateLimitPermit { _permit: permit }
    }
}

/// Proof that a rate limit token was consumed.
///
/// Holds the concurrency slot (if the limiter is bounded) until dropped.
#[derive(Debug)]
pub struct RateLimitPermit {
    _permit: Option<OwnedSemaphorePermit>,
}
