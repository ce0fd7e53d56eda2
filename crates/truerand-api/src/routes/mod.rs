//! Route modules.

pub mod generate;
pub mod health;
