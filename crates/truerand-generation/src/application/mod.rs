//! Application services for random sequence generation.

pub mod command_handlers;
