//! Biodiversity domain: endangered species, habitat and species discovery,
//! keyed by year and region.

pub mod domain;
pub mod fallback;
pub mod service;
pub mod sources;

pub use domain::{BiodiversitySources, SCHEMA};
pub use service::{get_biodiversity_data, get_biodiversity_data_with};
