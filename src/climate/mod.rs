//! Climate domain: temperature anomaly, sea level and polar ice, keyed by year.

pub mod domain;
pub mod fallback;
pub mod service;
pub mod sources;

pub use domain::{ClimateSources, SCHEMA};
pub use service::{get_climate_data, get_climate_data_with};
