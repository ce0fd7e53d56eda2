//! Test entropy sources — scripted `EntropySource` implementations.

use std::io::{self, Cursor};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use async_trait::async_trait;
use tokio::io::{AsyncRead, ReadBuf};
use truerand_core::entropy::{EntropyReader, EntropySource};
use truerand_core::error::GenerationError;

/// Open/close bookkeeping shared between a source and the readers it hands
/// out.
#[derive(Debug, Default)]
struct HandleCounts {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Reader that records its own drop so tests can assert the handle was
/// released.
struct TrackedReader<R> {
    inner: R,
    counts: Arc<HandleCounts>,
}

impl<R: AsyncRead + Unpin> AsyncRead for TrackedReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl<R> Drop for TrackedReader<R> {
    fn drop(&mut self) {
        self.counts.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// An entropy source that yields a predetermined byte sequence on every open.
/// Supplying fewer bytes than a request needs simulates a device that closes
/// mid-sequence.
#[derive(Debug, Clone)]
pub struct FixedEntropySource {
    bytes: Vec<u8>,
    counts: Arc<HandleCounts>,
}

impl FixedEntropySource {
    /// Create a source that replays `bytes` from the start on each open.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            counts: Arc::new(HandleCounts::default()),
        }
    }

    /// Number of handles opened so far.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.counts.opened.load(Ordering::SeqCst)
    }

    /// Number of handles that have since been dropped.
    #[must_use]
    pub fn closed(&self) -> usize {
        self.counts.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntropySource for FixedEntropySource {
    async fn open(&self) -> Result<EntropyReader, GenerationError> {
        self.counts.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedReader {
            inner: Cursor::new(self.bytes.clone()),
            counts: Arc::clone(&self.counts),
        }))
    }
}

/// An entropy source that can never be opened.
#[derive(Debug)]
pub struct UnavailableEntropySource;

#[async_trait]
impl EntropySource for UnavailableEntropySource {
    async fn open(&self) -> Result<EntropyReader, GenerationError> {
        Err(GenerationError::SourceUnavailable(
            "No such file or directory (os error 2)".into(),
        ))
    }
}

struct BrokenReader;

impl AsyncRead for BrokenReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::other("device error")))
    }
}

/// An entropy source that opens but fails every read with an I/O error.
#[derive(Debug)]
pub struct FailingEntropySource;

#[async_trait]
impl EntropySource for FailingEntropySource {
    async fn open(&self) -> Result<EntropyReader, GenerationError> {
        Ok(Box::new(BrokenReader))
    }
}

struct StalledReader;

impl AsyncRead for StalledReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Pending
    }
}

/// An entropy source whose reads never complete, like a starved blocking
/// device.
#[derive(Debug)]
pub struct StalledEntropySource;

#[async_trait]
impl EntropySource for StalledEntropySource {
    async fn open(&self) -> Result<EntropyReader, GenerationError> {
        Ok(Box::new(StalledReader))
    }
}
