//! Truerand — random sequence generation.
//!
//! Responsible for validating generation requests and turning them into a
//! bounded series of full reads from an entropy source.

pub mod application;
pub mod domain;
