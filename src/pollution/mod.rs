//! Pollution domain: greenhouse gases, air quality and plastics, keyed by year.

pub mod domain;
pub mod fallback;
pub mod service;
pub mod sources;

pub use domain::{PollutionSources, SCHEMA};
pub use service::{get_pollution_data, get_pollution_data_with};
