//! Process-wide token-bucket admission gate.
//!
//! The bucket holds up to `burst` tokens and refills continuously at
//! `rate_per_second`, computed from the wall-clock time elapsed since the last
//! refill. Each admitted request consumes one token. There is no per-caller
//! state: the bound is global.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;
use tracing::trace;

use crate::clock::Clock;

/// Sustained rate of the reference deployment, in tokens per second.
pub const DEFAULT_RATE_PER_SECOND: f64 = 8.0;

/// Burst capacity of the reference deployment.
pub const DEFAULT_BURST: u32 = 8;

/// Rejected limiter configuration.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidRateLimit {
    /// The sustained rate is zero, negative, or not finite.
    #[error("rate must be a finite number of tokens per second above zero, got {0}")]
    Rate(f64),

    /// The bucket cannot hold a single token.
    #[error("burst must hold at least one token")]
    Burst,
}

/// Validated limiter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimit {
    rate_per_second: f64,
    burst: u32,
}

impl RateLimit {
    /// Creates a limiter configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateLimit` if the rate is not a positive finite number
    /// or the burst is zero.
    pub fn new(rate_per_second: f64, burst: u32) -> Result<Self, InvalidRateLimit> {
        if !rate_per_second.is_finite() || rate_per_second <= 0.0 {
            return Err(InvalidRateLimit::Rate(rate_per_second));
        }
        if burst == 0 {
            return Err(InvalidRateLimit::Burst);
        }
        Ok(Self {
            rate_per_second,
            burst,
        })
    }

    /// Tokens added per second of elapsed time.
    #[must_use]
    pub fn rate_per_second(&self) -> f64 {
        self.rate_per_second
    }

    /// Maximum tokens the bucket holds.
    #[must_use]
    pub fn burst(&self) -> u32 {
        self.burst
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            rate_per_second: DEFAULT_RATE_PER_SECOND,
            burst: DEFAULT_BURST,
        }
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: DateTime<Utc>,
}

/// Global admission gate shared by every request handler.
pub struct RateLimiter {
    limit: RateLimit,
    clock: Arc<dyn Clock>,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Creates a limiter whose bucket starts full.
    #[must_use]
    pub fn new(limit: RateLimit, clock: Arc<dyn Clock>) -> Self {
        let bucket = Bucket {
            tokens: f64::from(limit.burst),
            last_refill: clock.now(),
        };
        Self {
            limit,
            clock,
            bucket: Mutex::new(bucket),
        }
    }

    /// Returns the configuration this limiter enforces.
    #[must_use]
    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Attempts to consume one token.
    ///
    /// Returns `true` and consumes a token if one is available after refilling
    /// for the elapsed time; returns `false` and consumes nothing otherwise.
    pub fn allow(&self) -> bool {
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);

        let elapsed = self.clock.since(bucket.last_refill);
        let capacity = f64::from(self.limit.burst);
        bucket.tokens =
            (bucket.tokens + elapsed.as_secs_f64() * self.limit.rate_per_second).min(capacity);
        bucket.last_refill += TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::zero());

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            trace!(remaining = bucket.tokens, "rate limiter admitted request");
            true
        } else {
            trace!(remaining = bucket.tokens, "rate limiter rejected request");
            false
        }
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
