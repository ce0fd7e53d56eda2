//! Truerand Core — shared abstractions.
//!
//! This crate defines the error taxonomy, the clock and entropy source seams,
//! and the process-wide token-bucket rate limiter. It contains no HTTP or
//! device code.

pub mod clock;
pub mod entropy;
pub mod error;
pub mod rate_limit;
