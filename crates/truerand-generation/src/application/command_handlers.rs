//! Command handlers for the generation context.
//!
//! This module contains the application-level handler that orchestrates a
//! generation: open the source, perform one full read per value, assemble.

use tokio::io::AsyncReadExt;
use tracing::{debug, error};
use truerand_core::entropy::EntropySource;
use truerand_core::error::GenerationError;

use crate::domain::commands::GenerateSequence;
use crate::domain::sequence::RandomSequence;
use crate::domain::width::ElementWidth;

/// Handles the `GenerateSequence` command: opens a fresh handle on `source`,
/// reads `count` values of the requested width in order, and returns them.
///
/// The handle is dropped on every exit path. A failed read discards every
/// value already read; no partial sequence is ever returned.
///
/// # Errors
///
/// Returns `GenerationError::SourceUnavailable` if the source cannot be
/// opened, or `GenerationError::SourceReadFailure` if any read comes up
/// short.
pub async fn handle_generate_sequence(
    command: &GenerateSequence,
    source: &dyn EntropySource,
) -> Result<RandomSequence, GenerationError> {
    let width = command.request.width();
    let count = command.request.count();

    let mut reader = source.open().await?;

    let mut values = Vec::with_capacity(count);
    let mut buf = [0u8; ElementWidth::U32.byte_len()];
    let chunk = &mut buf[..width.byte_len()];
    for index in 0..count {
        if let Err(e) = reader.read_exact(chunk).await {
            error!(
                correlation_id = %command.correlation_id,
                index,
                error = %e,
                "entropy read failed, discarding partial sequence"
            );
            return Err(GenerationError::SourceReadFailure(e.to_string()));
        }
        values.push(width.assemble(chunk));
    }

    debug!(
        correlation_id = %command.correlation_id,
        %width,
        count,
        "generated random sequence"
    );

    Ok(RandomSequence::new(values))
}
