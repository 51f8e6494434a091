//! Biodiversity columns, regional parameters and source slots.

use crate::table::domain::{DimensionKind, Domain, DomainSchema, Region};
use crate::table::pipeline::TableSource;

use super::sources::{SyntheticEndangered, SyntheticHabitat, SyntheticSpeciesDiscovery};

pub const ENDANGERED_COUNT: &str = "endangered_species_count";
pub const EXTINCTION_RATE: &str = "extinction_rate";
pub const CONSERVATION_INDEX: &str = "conservation_status_index";
pub const REMAINING_HABITAT: &str = "remaining_habitat_mil_hectares";
pub const ANNUAL_HABITAT_LOSS: &str = "annual_habitat_loss_mil_hectares";
pub const FRAGMENTATION_INDEX: &str = "habitat_fragmentation_index";
pub const NEW_SPECIES: &str = "new_species_discovered";
pub const CUMULATIVE_SPECIES: &str = "cumulative_known_species";
pub const ESTIMATED_TOTAL_SPECIES: &str = "estimated_total_species";

pub const ENDANGERED_FIELDS: &[&str] = &[ENDANGERED_COUNT, EXTINCTION_RATE, CONSERVATION_INDEX];
pub const HABITAT_FIELDS: &[&str] = &[REMAINING_HABITAT, ANNUAL_HABITAT_LOSS, FRAGMENTATION_INDEX];
pub const SPECIES_FIELDS: &[&str] = &[NEW_SPECIES, CUMULATIVE_SPECIES, ESTIMATED_TOTAL_SPECIES];

pub const FIELDS: &[&str] = &[
    ENDANGERED_COUNT,
    EXTINCTION_RATE,
    CONSERVATION_INDEX,
    REMAINING_HABITAT,
    ANNUAL_HABITAT_LOSS,
    FRAGMENTATION_INDEX,
    NEW_SPECIES,
    CUMULATIVE_SPECIES,
    ESTIMATED_TOTAL_SPECIES,
];

pub const START_YEAR: i32 = 2000;
pub const ENDANGERED_SIGMA: f64 = 0.005;
pub const HABITAT_SIGMA: f64 = 0.002;

pub const SCHEMA: DomainSchema = DomainSchema {
    domain: Domain::Biodiversity,
    key: Some(DimensionKind::Region),
    fields: FIELDS,
    first_year: START_YEAR,
};

/// Year-2000 baselines and annual rates for one region.
#[derive(Copy, Clone, Debug)]
pub struct RegionProfile {
    pub region: Region,
    pub endangered_base: f64,
    pub endangered_growth: f64,
    /// Million hectares.
    pub habitat_area: f64,
    pub habitat_loss: f64,
}

pub const PROFILES: [RegionProfile; 6] = [
    RegionProfile {
        region: Region::Africa,
        endangered_base: 5200.0,
        endangered_growth: 0.03,
        habitat_area: 2300.0,
        habitat_loss: 0.01,
    },
    RegionProfile {
        region: Region::Asia,
        endangered_base: 7100.0,
        endangered_growth: 0.035,
        habitat_area: 1800.0,
        habitat_loss: 0.012,
    },
    RegionProfile {
        region: Region::Europe,
        endangered_base: 2300.0,
        endangered_growth: 0.01,
        habitat_area: 950.0,
        habitat_loss: 0.005,
    },
    RegionProfile {
        region: Region::NorthAmerica,
        endangered_base: 1800.0,
        endangered_growth: 0.015,
        habitat_area: 1900.0,
        habitat_loss: 0.006,
    },
    RegionProfile {
        region: Region::Oceania,
        endangered_base: 4100.0,
        endangered_growth: 0.02,
        habitat_area: 800.0,
        habitat_loss: 0.008,
    },
    RegionProfile {
        region: Region::SouthAmerica,
        endangered_base: 4600.0,
        endangered_growth: 0.025,
        habitat_area: 1700.0,
        habitat_loss: 0.011,
    },
];

/// Endangered and habitat are region-keyed; species data is global and
/// broadcast to every region.
pub struct BiodiversitySources {
    pub endangered: Box<dyn TableSource>,
    pub habitat: Box<dyn TableSource>,
    pub species: Box<dyn TableSource>,
}

impl Default for BiodiversitySources {
    fn default() -> Self {
        Self {
            endangered: Box::new(SyntheticEndangered),
            habitat: Box::new(SyntheticHabitat),
            species: Box::new(SyntheticSpeciesDiscovery),
        }
    }
}
