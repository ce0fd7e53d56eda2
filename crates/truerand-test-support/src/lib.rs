//! Shared test mocks and utilities for the Truerand entropy service.

mod clock;
mod entropy;

pub use clock::{FixedClock, ManualClock};
pub use entropy::{
    FailingEntropySource, FixedEntropySource, StalledEntropySource, UnavailableEntropySource,
};
