//! Domain types for random sequence generation.

pub mod commands;
pub mod request;
pub mod sequence;
pub mod width;
