//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use truerand_core::rate_limit::{DEFAULT_BURST, DEFAULT_RATE_PER_SECOND, RateLimit};
use truerand_entropy::device_entropy_source::DEFAULT_DEVICE_PATH;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Settings the server needs at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the blocking random device.
    pub entropy_device: PathBuf,
    pub rate_limit: RateLimit,
    /// Bound on one generation request; `None` when disabled with `0`.
    pub read_timeout: Option<Duration>,
    /// Directory of static UI assets served at `/`, if any.
    pub static_dir: Option<PathBuf>,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let entropy_device = lookup("ENTROPY_DEVICE")
            .map_or_else(|| PathBuf::from(DEFAULT_DEVICE_PATH), PathBuf::from);

        let rate = parse_or(&lookup, "RATE_LIMIT_PER_SECOND", DEFAULT_RATE_PER_SECOND)?;
        let burst = parse_or(&lookup, "RATE_LIMIT_BURST", DEFAULT_BURST)?;
        let rate_limit = RateLimit::new(rate, burst)
            .map_err(|e| AppError::Config(format!("invalid rate limit: {e}")))?;

        let timeout_ms = parse_or(&lookup, "ENTROPY_READ_TIMEOUT_MS", DEFAULT_READ_TIMEOUT_MS)?;
        let read_timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));

        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|url| !url.is_empty());

        Ok(Self {
            host,
            port,
            entropy_device,
            rate_limit,
            read_timeout,
            static_dir,
            otlp_endpoint,
        })
    }

    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` and `PORT` do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid value: {e}"))),
    }
}
