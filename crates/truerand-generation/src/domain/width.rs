//! Element widths and their per-request ceilings.

use std::fmt;
use std::str::FromStr;

use truerand_core::error::GenerationError;

/// Upper bound on bytes read from the entropy source by a single request.
/// Each width's maximum count is derived from it.
pub const MAX_BYTES_PER_REQUEST: usize = 64;

/// Size of each generated integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementWidth {
    /// One byte per value.
    U8,
    /// Two bytes per value, big-endian.
    U16,
    /// Four bytes per value, big-endian.
    U32,
}

impl ElementWidth {
    /// All supported widths, narrowest first.
    pub const ALL: [Self; 3] = [Self::U8, Self::U16, Self::U32];

    /// Bytes consumed from the source per value.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Largest count a single request may ask for at this width.
    #[must_use]
    pub const fn max_count(self) -> usize {
        MAX_BYTES_PER_REQUEST / self.byte_len()
    }

    /// The query-string token naming this width.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
        }
    }

    /// Assembles one value from exactly `byte_len` bytes, most significant
    /// byte first.
    #[must_use]
    pub fn assemble(self, bytes: &[u8]) -> u32 {
        debug_assert_eq!(bytes.len(), self.byte_len());
        bytes
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte))
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementWidth {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint8" => Ok(Self::U8),
            "uint16" => Ok(Self::U16),
            "uint32" => Ok(Self::U32),
            _ => Err(GenerationError::InvalidParameter("type")),
        }
    }
}
