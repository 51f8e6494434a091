//! Synthetic per-type ecosystem sources.

use rand::Rng;

use crate::common::error::PulseResult;
use crate::series::noise::{bounded, uniform, Bounds};
use crate::series::{expand, GenContext, KeyedSeries, SeriesPoint};
use crate::table::domain::{DataTable, DimensionKind, EcosystemType, Value, Year};
use crate::table::pipeline::TableSource;

use super::domain::{fields_for, profile, LAND_AREA, START_YEAR};

/// Bleaching share of reefs: background before 2000, rising sharply after
/// 2010 and capped at 90%.
pub fn bleaching_percent<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    if year < 2000 {
        uniform(rng, 0.0, 5.0)
    } else if year < 2010 {
        5.0 + uniform(rng, 0.0, 10.0)
    } else {
        let bleaching = 15.0 + f64::from(year - 2010) * 1.2 + uniform(rng, -5.0, 10.0);
        Bounds::at_most(90.0).clamp(bleaching)
    }
}

/// Values for `fields_for(kind)` at one point of the area series.
pub fn derive_row<R: Rng + ?Sized>(
    rng: &mut R,
    kind: EcosystemType,
    point: &SeriesPoint,
) -> Vec<Value> {
    let elapsed = f64::from(point.elapsed);
    let area = point.value;
    // Subtracting from 0.0 keeps a zero change as +0.0, which serializes as `0.0`.
    let change = 0.0 - point.effective_rate * 100.0;
    let mut values: Vec<Value> = vec![area.into(), change.into()];
    match kind {
        EcosystemType::Forests => {
            let health = bounded(rng, 75.0 - elapsed * 0.25, 3.0, Bounds::INDEX);
            let primary = bounded(rng, 45.0 - elapsed * 0.2, 1.0, Bounds::at_least(20.0));
            values.extend([
                health.into(),
                (area / LAND_AREA * 100.0).into(),
                primary.into(),
            ]);
        }
        EcosystemType::CoralReefs => {
            let health = bounded(rng, 80.0 - elapsed * 0.5, 2.0, Bounds::INDEX);
            let cover = bounded(rng, 50.0 - elapsed * 0.4, 3.0, Bounds::at_least(5.0));
            let bleaching = bleaching_percent(rng, point.year);
            values.extend([health.into(), cover.into(), bleaching.into()]);
        }
        EcosystemType::Wetlands => {
            let health = bounded(rng, 70.0 - elapsed * 0.3, 4.0, Bounds::INDEX);
            values.extend([health.into(), area.into()]);
        }
        EcosystemType::Grasslands => {
            let health = bounded(rng, 65.0 - elapsed * 0.2, 3.0, Bounds::INDEX);
            let carbon = bounded(rng, 80.0 - elapsed * 0.3, 2.0, Bounds::at_least(30.0));
            let risk = bounded(rng, 35.0 + elapsed * 0.4, 4.0, Bounds::INDEX);
            values.extend([health.into(), carbon.into(), risk.into()]);
        }
    }
    values
}

/// One ecosystem type from 1990, keyed by `(year, ecosystem_type)`.
pub struct SyntheticEcosystem {
    kind: EcosystemType,
}

impl SyntheticEcosystem {
    pub fn new(kind: EcosystemType) -> Self {
        Self { kind }
    }
}

impl TableSource for SyntheticEcosystem {
    fn name(&self) -> &'static str {
        match self.kind {
            EcosystemType::Forests => "forest",
            EcosystemType::CoralReefs => "coral_reef",
            EcosystemType::Wetlands => "wetland",
            EcosystemType::Grasslands => "soil",
        }
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let keyed = KeyedSeries {
            dimension: self.kind.into(),
            series: profile(self.kind).series(ctx.years_from(START_YEAR)),
        };
        let kind = self.kind;
        expand(
            DimensionKind::EcosystemType,
            fields_for(kind),
            &[keyed],
            ctx.rng(),
            |rng, _, point| derive_row(rng, kind, point),
        )
    }
}
