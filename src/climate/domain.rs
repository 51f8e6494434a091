//! Climate columns and source slots.

use crate::table::domain::{Domain, DomainSchema};
use crate::table::pipeline::TableSource;

use super::sources::{SyntheticIceExtent, SyntheticSeaLevel, SyntheticTemperature};

pub const TEMPERATURE_ANOMALY: &str = "temperature_anomaly";
pub const SEA_LEVEL_RISE_MM: &str = "sea_level_rise_mm";
pub const ARCTIC_ICE: &str = "arctic_ice_extent_mil_sq_km";
pub const ANTARCTIC_ICE: &str = "antarctic_ice_extent_mil_sq_km";
pub const TOTAL_ICE: &str = "total_ice_extent_mil_sq_km";

pub const FIELDS: &[&str] = &[
    TEMPERATURE_ANOMALY,
    SEA_LEVEL_RISE_MM,
    ARCTIC_ICE,
    ANTARCTIC_ICE,
    TOTAL_ICE,
];

/// First year of the instrumental temperature record.
pub const RECORD_START: i32 = 1880;
pub const SEA_LEVEL_START: i32 = 1970;
/// Start of the satellite ice record.
pub const ICE_START: i32 = 1979;
/// Years covered by the synthetic fallback.
pub const FALLBACK_YEARS: i32 = 50;

pub const SCHEMA: DomainSchema = DomainSchema {
    domain: Domain::Climate,
    key: None,
    fields: FIELDS,
    first_year: RECORD_START,
};

/// Temperature is the base; sea level and ice are joined onto it by year.
pub struct ClimateSources {
    pub temperature: Box<dyn TableSource>,
    pub sea_level: Box<dyn TableSource>,
    pub ice: Box<dyn TableSource>,
}

impl Default for ClimateSources {
    fn default() -> Self {
        Self {
            temperature: Box::new(SyntheticTemperature),
            sea_level: Box::new(SyntheticSeaLevel),
            ice: Box::new(SyntheticIceExtent),
        }
    }
}
