//! Device-file implementation of the `EntropySource` trait.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error};

use truerand_core::entropy::{EntropyReader, EntropySource};
use truerand_core::error::GenerationError;

/// Path of the blocking random device on Unix-like systems.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/random";

/// Entropy source backed by a character device such as `/dev/random`.
///
/// Each `open` yields a fresh file handle. On Unix the device is opened
/// non-blocking and polled by the tokio reactor, so a read that is waiting on
/// the kernel pool holds no thread, and dropping the reader closes the
/// descriptor at once. Regular files cannot be registered with the reactor
/// and are read through `tokio::fs::File` instead.
#[derive(Debug, Clone)]
pub struct DeviceEntropySource {
    path: PathBuf,
}

impl DeviceEntropySource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the device path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DeviceEntropySource {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_PATH)
    }
}

#[async_trait]
impl EntropySource for DeviceEntropySource {
    async fn open(&self) -> Result<EntropyReader, GenerationError> {
        match open_reader(&self.path) {
            Ok(reader) => {
                debug!(path = %self.path.display(), "opened entropy device");
                Ok(reader)
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to open entropy device");
                Err(GenerationError::SourceUnavailable(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        }
    }
}

#[cfg(unix)]
fn open_reader(path: &Path) -> io::Result<EntropyReader> {
    use std::os::unix::fs::OpenOptionsExt;

    // O_NONBLOCK also keeps opening a FIFO with no writer from hanging.
    let file = OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)?;

    if file.metadata()?.is_file() {
        return Ok(Box::new(tokio::fs::File::from_std(file)));
    }
    Ok(Box::new(polled::PolledDevice::new(file)?))
}

#[cfg(not(unix))]
fn open_reader(path: &Path) -> io::Result<EntropyReader> {
    let file = OpenOptions::new().read(true).open(path)?;
    Ok(Box::new(tokio::fs::File::from_std(file)))
}

#[cfg(unix)]
mod polled {
    use std::fs::File;
    use std::io::{self, Read};
    use std::pin::Pin;
    use std::task::{Context, Poll, ready};

    use tokio::io::unix::AsyncFd;
    use tokio::io::{AsyncRead, Interest, ReadBuf};

    /// Non-blocking device descriptor registered with the tokio reactor.
    ///
    /// Dropping it deregisters and closes the descriptor on the dropping
    /// thread; no read is ever left running elsewhere.
    #[derive(Debug)]
    pub(super) struct PolledDevice {
        fd: AsyncFd<File>,
    }

    impl PolledDevice {
        pub(super) fn new(file: File) -> io::Result<Self> {
            Ok(Self {
                fd: AsyncFd::with_interest(file, Interest::READABLE)?,
            })
        }
    }

    impl AsyncRead for PolledDevice {
        fn poll_read(
            self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            loop {
                let mut guard = ready!(self.fd.poll_read_ready(cx))?;

                let unfilled = buf.initialize_unfilled();
                match guard.try_io(|inner| inner.get_ref().read(unfilled)) {
                    Ok(Ok(n)) => {
                        buf.advance(n);
                        return Poll::Ready(Ok(()));
                    }
                    Ok(Err(e)) => return Poll::Ready(Err(e)),
                    // Readiness was stale; try_io cleared it, so poll again.
                    Err(_would_block) => {}
                }
            }
        }
    }
}
