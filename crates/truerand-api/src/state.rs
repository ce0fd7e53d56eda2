//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use truerand_core::entropy::EntropySource;
use truerand_core::rate_limit::RateLimiter;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single process-wide admission gate.
    pub limiter: Arc<RateLimiter>,
    /// Source opened once per generation request.
    pub entropy_source: Arc<dyn EntropySource>,
    /// Upper bound on a single generation; `None` waits indefinitely.
    pub read_timeout: Option<Duration>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        limiter: Arc<RateLimiter>,
        entropy_source: Arc<dyn EntropySource>,
        read_timeout: Option<Duration>,
    ) -> Self {
        Self {
            limiter,
            entropy_source,
            read_timeout,
        }
    }
}
