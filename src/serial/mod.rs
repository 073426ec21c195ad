//! Serial number generation for containers.

mod generator;

pub use generator::{SerialGenerator, SerialNumber};
