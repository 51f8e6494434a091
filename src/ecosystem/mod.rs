//! Ecosystem domain: forests, coral reefs, wetlands and grasslands, keyed by
//! year and ecosystem type.

pub mod domain;
pub mod fallback;
pub mod service;
pub mod sources;

pub use domain::{EcosystemSources, SCHEMA};
pub use service::{get_ecosystem_data, get_ecosystem_data_with};
