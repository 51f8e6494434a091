//! Headline indicators: latest value of a few key metrics and their change
//! against the year before.

pub mod service;

pub use service::{vital_signs, vital_signs_json, VitalSign};
