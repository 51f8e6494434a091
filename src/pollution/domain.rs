//! Pollution columns, category rules and source slots.

use crate::table::domain::{Domain, DomainSchema};
use crate::table::merge::CategoryRule;
use crate::table::pipeline::TableSource;

use super::sources::{SyntheticAirQuality, SyntheticGreenhouseGases, SyntheticPlastics};

pub const CO2_LEVEL: &str = "co2_level";
pub const METHANE_LEVEL: &str = "methane_level";
pub const NITROUS_OXIDE_LEVEL: &str = "nitrous_oxide_level";
pub const PM25_LEVEL: &str = "pm25_level";
pub const OZONE_LEVEL: &str = "ozone_level";
pub const AIR_QUALITY_INDEX: &str = "global_air_quality_index";
pub const OCEAN_PLASTIC: &str = "ocean_plastic_mil_tons";
pub const MICROPLASTIC: &str = "microplastic_concentration";
pub const CHEMICAL_INDEX: &str = "chemical_pollution_index";
pub const POLLUTANT_CATEGORY: &str = "pollutant_category";

pub const GAS_FIELDS: &[&str] = &[CO2_LEVEL, METHANE_LEVEL, NITROUS_OXIDE_LEVEL];
pub const AIR_FIELDS: &[&str] = &[PM25_LEVEL, OZONE_LEVEL, AIR_QUALITY_INDEX];
pub const PLASTIC_FIELDS: &[&str] = &[OCEAN_PLASTIC, MICROPLASTIC, CHEMICAL_INDEX];

pub const FIELDS: &[&str] = &[
    CO2_LEVEL,
    METHANE_LEVEL,
    NITROUS_OXIDE_LEVEL,
    PM25_LEVEL,
    OZONE_LEVEL,
    AIR_QUALITY_INDEX,
    OCEAN_PLASTIC,
    MICROPLASTIC,
    CHEMICAL_INDEX,
    POLLUTANT_CATEGORY,
];

pub const AIR_POLLUTANTS: &str = "Air Pollutants";
pub const WATER_POLLUTANTS: &str = "Water Pollutants";
pub const SOIL_POLLUTANTS: &str = "Soil Pollutants";

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        tag: AIR_POLLUTANTS,
        fields: &[
            CO2_LEVEL,
            METHANE_LEVEL,
            NITROUS_OXIDE_LEVEL,
            PM25_LEVEL,
            OZONE_LEVEL,
        ],
    },
    CategoryRule {
        tag: WATER_POLLUTANTS,
        fields: &[OCEAN_PLASTIC, MICROPLASTIC],
    },
    CategoryRule {
        tag: SOIL_POLLUTANTS,
        fields: &[CHEMICAL_INDEX],
    },
];

pub const GAS_START: i32 = 1960;
/// First year of the air-quality and plastics monitoring series.
pub const MONITORING_START: i32 = 1990;

pub const SCHEMA: DomainSchema = DomainSchema {
    domain: Domain::Pollution,
    key: None,
    fields: FIELDS,
    first_year: GAS_START,
};

/// Tried in field order; the first that succeeds becomes the base.
pub struct PollutionSources {
    pub gases: Box<dyn TableSource>,
    pub air: Box<dyn TableSource>,
    pub plastics: Box<dyn TableSource>,
}

impl Default for PollutionSources {
    fn default() -> Self {
        Self {
            gases: Box::new(SyntheticGreenhouseGases),
            air: Box::new(SyntheticAirQuality),
            plastics: Box::new(SyntheticPlastics),
        }
    }
}
