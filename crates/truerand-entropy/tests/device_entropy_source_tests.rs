//! Integration tests for `DeviceEntropySource`.

use std::path::PathBuf;

use tokio::io::AsyncReadExt;
use truerand_core::entropy::EntropySource;
use truerand_core::error::GenerationError;
use truerand_entropy::device_entropy_source::{DEFAULT_DEVICE_PATH, DeviceEntropySource};
use uuid::Uuid;

/// Writes `bytes` to a uniquely named file under the system temp directory.
fn scratch_file(bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("truerand-{}.bin", Uuid::new_v4()));
    std::fs::write(&path, bytes).unwrap();
    path
}

#[tokio::test]
async fn test_open_reads_bytes_in_file_order() {
    let path = scratch_file(&[0x12, 0x34, 0xAB]);
    let source = DeviceEntropySource::new(&path);

    let mut reader = source.open().await.unwrap();
    let mut buf = [0u8; 3];
    reader.read_exact(&mut buf).await.unwrap();

    assert_eq!(buf, [0x12, 0x34, 0xAB]);
    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_each_open_starts_a_fresh_handle() {
    let path = scratch_file(&[0x01, 0x02]);
    let source = DeviceEntropySource::new(&path);

    for _ in 0..2 {
        let mut reader = source.open().await.unwrap();
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [0x01]);
    }
    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_short_device_reports_unexpected_eof() {
    let path = scratch_file(&[0xFF]);
    let source = DeviceEntropySource::new(&path);

    let mut reader = source.open().await.unwrap();
    let mut buf = [0u8; 4];
    let err = reader.read_exact(&mut buf).await.unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_missing_device_is_source_unavailable() {
    let path = std::env::temp_dir().join(format!("truerand-missing-{}", Uuid::new_v4()));
    let source = DeviceEntropySource::new(&path);

    let result = source.open().await;

    assert!(matches!(result, Err(GenerationError::SourceUnavailable(_))));
}

#[test]
fn test_default_path_is_blocking_random_device() {
    let source = DeviceEntropySource::default();
    assert_eq!(source.path(), std::path::Path::new(DEFAULT_DEVICE_PATH));
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_random_device_yields_bytes() {
    let source = DeviceEntropySource::new("/dev/urandom");

    let mut reader = source.open().await.unwrap();
    let mut buf = [0u8; 64];
    reader.read_exact(&mut buf).await.unwrap();
}

/// Named-pipe checks: a FIFO with an idle writer blocks readers exactly the
/// way a drained `/dev/random` does.
#[cfg(target_os = "linux")]
mod fifo {
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use tokio::io::AsyncReadExt;
    use truerand_core::entropy::EntropySource;
    use truerand_entropy::device_entropy_source::DeviceEntropySource;
    use uuid::Uuid;

    fn make_fifo() -> PathBuf {
        let path = std::env::temp_dir().join(format!("truerand-{}.fifo", Uuid::new_v4()));
        let status = std::process::Command::new("mkfifo")
            .arg(&path)
            .status()
            .unwrap();
        assert!(status.success());
        std::fs::canonicalize(path).unwrap()
    }

    /// Counts this process's descriptors that refer to `path`.
    fn descriptors_on(path: &Path) -> usize {
        std::fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| std::fs::read_link(entry.ok()?.path()).ok())
            .filter(|target| target == path)
            .count()
    }

    #[tokio::test]
    async fn test_dropping_a_stalled_read_closes_the_descriptor() {
        // Arrange: an idle writer keeps reads waiting instead of hitting EOF.
        let path = make_fifo();
        let source = DeviceEntropySource::new(&path);
        let mut reader = source.open().await.unwrap();
        let _writer = std::fs::OpenOptions::new().write(true).open(&path).unwrap();

        // Act
        let mut buf = [0u8; 4];
        let outcome =
            tokio::time::timeout(Duration::from_millis(100), reader.read_exact(&mut buf)).await;
        let while_open = descriptors_on(&path);
        drop(reader);

        // Assert
        assert!(outcome.is_err());
        assert_eq!(while_open, 2);
        assert_eq!(descriptors_on(&path), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_bytes_written_later_wake_the_reader() {
        let path = make_fifo();
        let source = DeviceEntropySource::new(&path);
        let mut reader = source.open().await.unwrap();
        let mut writer = std::fs::OpenOptions::new().write(true).open(&path).unwrap();

        let read = tokio::spawn(async move {
            let mut buf = [0u8; 3];
            reader.read_exact(&mut buf).await.map(|_| buf)
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        writer.write_all(&[0xAB, 0xCD, 0xEF]).unwrap();

        let buf = tokio::time::timeout(Duration::from_secs(2), read)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(buf, [0xAB, 0xCD, 0xEF]);
        std::fs::remove_file(path).unwrap();
    }
}
