//! Generated random sequences.

/// An ordered run of random values, in the order they were read.
///
/// Values are right-aligned in 32 bits regardless of width. A sequence only
/// exists once every requested value has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSequence {
    values: Vec<u32>,
}

impl RandomSequence {
    pub(crate) fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Consumes the sequence, returning the values in draw order.
    #[must_use]
    pub fn into_values(self) -> Vec<u32> {
        self.values
    }
}
