//! Ecosystem columns, per-type parameters and source slots.

use crate::series::CompoundingSeries;
use crate::table::domain::{DimensionKind, Domain, DomainSchema, EcosystemType, Year, YearRange};
use crate::table::pipeline::TableSource;

use super::sources::SyntheticEcosystem;

pub const AREA: &str = "area_mil_hectares";
pub const ANNUAL_CHANGE: &str = "annual_change_percent";
pub const HEALTH_INDEX: &str = "health_index";
pub const FOREST_COVERAGE: &str = "forest_coverage_percent";
pub const PRIMARY_FOREST: &str = "primary_forest_percent";
pub const CORAL_COVER: &str = "coral_cover_percent";
pub const BLEACHING: &str = "bleaching_percent";
pub const WETLAND_AREA: &str = "wetland_area_mil_hectares";
pub const SOIL_CARBON: &str = "soil_carbon_content";
pub const DESERTIFICATION_RISK: &str = "desertification_risk_index";

pub const FIELDS: &[&str] = &[
    AREA,
    ANNUAL_CHANGE,
    HEALTH_INDEX,
    FOREST_COVERAGE,
    PRIMARY_FOREST,
    CORAL_COVER,
    BLEACHING,
    WETLAND_AREA,
    SOIL_CARBON,
    DESERTIFICATION_RISK,
];

pub const START_YEAR: Year = 1990;
/// Global land area in million hectares.
pub const LAND_AREA: f64 = 13_000.0;

pub const SCHEMA: DomainSchema = DomainSchema {
    domain: Domain::Ecosystem,
    key: Some(DimensionKind::EcosystemType),
    fields: FIELDS,
    first_year: START_YEAR,
};

/// Columns produced for one ecosystem type, shared columns first.
pub fn fields_for(kind: EcosystemType) -> &'static [&'static str] {
    match kind {
        EcosystemType::Forests => {
            &[AREA, ANNUAL_CHANGE, HEALTH_INDEX, FOREST_COVERAGE, PRIMARY_FOREST]
        }
        EcosystemType::CoralReefs => &[AREA, ANNUAL_CHANGE, HEALTH_INDEX, CORAL_COVER, BLEACHING],
        EcosystemType::Wetlands => &[AREA, ANNUAL_CHANGE, HEALTH_INDEX, WETLAND_AREA],
        EcosystemType::Grasslands => {
            &[AREA, ANNUAL_CHANGE, HEALTH_INDEX, SOIL_CARBON, DESERTIFICATION_RISK]
        }
    }
}

/// 1990 area and yearly loss rate of one ecosystem type.
#[derive(Copy, Clone, Debug)]
pub struct TypeProfile {
    pub kind: EcosystemType,
    pub area: f64,
    pub loss_rate: f64,
    pub sigma: f64,
    /// `(from_year, rate, sigma)` once the loss regime shifts.
    pub regime: Option<(Year, f64, f64)>,
}

impl TypeProfile {
    /// Area series: chained compounding decline from the 1990 area.
    pub fn series(&self, years: YearRange) -> CompoundingSeries {
        let series =
            CompoundingSeries::decline(self.area, self.loss_rate, self.sigma, years).chained();
        match self.regime {
            Some((from_year, rate, sigma)) => series.with_regime(from_year, rate, sigma),
            None => series,
        }
    }
}

pub static PROFILES: [TypeProfile; 4] = [
    TypeProfile {
        kind: EcosystemType::CoralReefs,
        area: 28.0,
        loss_rate: 0.005,
        sigma: 0.001,
        regime: Some((2010, 0.012, 0.003)),
    },
    TypeProfile {
        kind: EcosystemType::Forests,
        area: 4128.0,
        loss_rate: 0.002,
        sigma: 0.0005,
        regime: Some((2010, 0.001, 0.0008)),
    },
    TypeProfile {
        kind: EcosystemType::Grasslands,
        area: 5200.0,
        loss_rate: 0.004,
        sigma: 0.0015,
        regime: None,
    },
    TypeProfile {
        kind: EcosystemType::Wetlands,
        area: 1280.0,
        loss_rate: 0.008,
        sigma: 0.002,
        regime: None,
    },
];

pub fn profile(kind: EcosystemType) -> &'static TypeProfile {
    match kind {
        EcosystemType::CoralReefs => &PROFILES[0],
        EcosystemType::Forests => &PROFILES[1],
        EcosystemType::Grasslands => &PROFILES[2],
        EcosystemType::Wetlands => &PROFILES[3],
    }
}

/// Forest is the base; the other types are stacked onto it.
pub struct EcosystemSources {
    pub forest: Box<dyn TableSource>,
    pub coral: Box<dyn TableSource>,
    pub wetland: Box<dyn TableSource>,
    pub soil: Box<dyn TableSource>,
}

impl Default for EcosystemSources {
    fn default() -> Self {
        Self {
            forest: Box::new(SyntheticEcosystem::new(EcosystemType::Forests)),
            coral: Box::new(SyntheticEcosystem::new(EcosystemType::CoralReefs)),
            wetland: Box::new(SyntheticEcosystem::new(EcosystemType::Wetlands)),
            soil: Box::new(SyntheticEcosystem::new(EcosystemType::Grasslands)),
        }
    }
}
