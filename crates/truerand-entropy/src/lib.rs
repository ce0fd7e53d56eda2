//! Truerand Entropy — entropy device adapters.

pub mod device_entropy_source;
