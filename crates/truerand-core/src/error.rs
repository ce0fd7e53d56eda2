//! Generation error types.

use thiserror::Error;

/// Every way a generation request can fail at the request boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The global rate limiter denied admission.
    #[error("Too many requests")]
    RateLimitExceeded,

    /// A query parameter failed validation. Carries the parameter name.
    #[error("Invalid {0} parameter")]
    InvalidParameter(&'static str),

    /// The entropy source could not be opened.
    #[error("failed to open entropy source: {0}")]
    SourceUnavailable(String),

    /// A read from the entropy source did not fill its buffer.
    #[error("failed to read from entropy source: {0}")]
    SourceReadFailure(String),
}
