//! Entropy source abstraction.
//!
//! In production this opens the operating system's random device. In tests,
//! scripted byte streams are injected.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::GenerationError;

/// An open, readable handle on an entropy source. Dropping it closes the
/// underlying device.
pub type EntropyReader = Box<dyn AsyncRead + Send + Unpin>;

/// A source of cryptographically strong random bytes.
#[async_trait]
pub trait EntropySource: Send + Sync {
    /// Opens a fresh handle on the source. Called once per request.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::SourceUnavailable` if the source cannot be
    /// opened.
    async fn open(&self) -> Result<EntropyReader, GenerationError>;
}
