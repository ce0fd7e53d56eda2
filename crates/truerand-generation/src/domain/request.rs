//! Validated generation requests.

use truerand_core::error::GenerationError;

use super::width::ElementWidth;

/// A width and count that have passed validation. The count is at least one
/// and never exceeds the width's ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    width: ElementWidth,
    count: usize,
}

impl GenerationRequest {
    /// Builds a request from an already-parsed width and count.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidParameter("length")` if `count` is
    /// zero or exceeds `width.max_count()`.
    pub fn new(width: ElementWidth, count: usize) -> Result<Self, GenerationError> {
        if count == 0 || count > width.max_count() {
            return Err(GenerationError::InvalidParameter("length"));
        }
        Ok(Self { width, count })
    }

    /// Validates raw `type` and `length` query values. The width is checked
    /// first; a missing value is invalid.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidParameter` naming the first parameter
    /// that fails.
    pub fn parse(width: Option<&str>, length: Option<&str>) -> Result<Self, GenerationError> {
        let width: ElementWidth = width
            .ok_or(GenerationError::InvalidParameter("type"))?
            .parse()?;

        let count = length
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(GenerationError::InvalidParameter("length"))?;

        Self::new(width, count)
    }

    /// Width of every value in the sequence.
    #[must_use]
    pub fn width(&self) -> ElementWidth {
        self.width
    }

    /// Number of values to generate.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}
