//! Shared utilities that glue the different domains together.
pub mod config;
pub mod error;
pub mod format;
pub mod log;
pub mod time;

pub use error::{PulseCode, PulseError, PulseResult};
