//! Synthetic primary sources for the climate domain.

use crate::common::error::PulseResult;
use crate::series::noise::gaussian;
use crate::series::{CompoundingSeries, GenContext};
use crate::table::domain::DataTable;
use crate::table::pipeline::TableSource;

use super::domain::{
    ANTARCTIC_ICE, ARCTIC_ICE, ICE_START, RECORD_START, SEA_LEVEL_RISE_MM, SEA_LEVEL_START,
    TEMPERATURE_ANOMALY, TOTAL_ICE,
};

const PREINDUSTRIAL_OFFSET: f64 = -0.3;
const WARMING_BASE: f64 = 0.08;
const WARMING_RATE: f64 = 0.02;
const WARMING_SIGMA: f64 = 0.0005;

const ARCTIC_BASE: f64 = 16.0;
const ARCTIC_DECLINE: f64 = 0.013;
const ARCTIC_FLOOR: f64 = 3.0;
const ANTARCTIC_BASE: f64 = 20.0;
const ANTARCTIC_DECLINE: f64 = 0.005;
const ANTARCTIC_FLOOR: f64 = 5.0;

/// Global temperature anomaly since 1880: an offset plus a compounding
/// warming term, which gives the accelerating late-century curve.
pub struct SyntheticTemperature;

impl TableSource for SyntheticTemperature {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let years = ctx.years_from(RECORD_START);
        let warming = CompoundingSeries::growth(WARMING_BASE, WARMING_RATE, WARMING_SIGMA, years)
            .generate(ctx.rng())?;
        let mut table = DataTable::new(None, &[TEMPERATURE_ANOMALY]);
        for point in warming {
            let anomaly = PREINDUSTRIAL_OFFSET + point.value + gaussian(ctx.rng(), 0.08);
            table.push(point.year, None, vec![anomaly.into()])?;
        }
        Ok(table)
    }
}

/// Mean sea level rise in mm relative to 1970.
pub struct SyntheticSeaLevel;

impl TableSource for SyntheticSeaLevel {
    fn name(&self) -> &'static str {
        "sea_level"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let mut table = DataTable::new(None, &[SEA_LEVEL_RISE_MM]);
        for year in ctx.years_from(SEA_LEVEL_START).iter() {
            let rise = sea_level_rise(year) + gaussian(ctx.rng(), 2.0);
            table.push(year, None, vec![rise.max(0.0).into()])?;
        }
        Ok(table)
    }
}

/// Accelerating rise: `2.5 mm/yr`, growing 1% per elapsed year. Zero before 1970.
pub fn sea_level_rise(year: i32) -> f64 {
    let elapsed = f64::from(year - SEA_LEVEL_START);
    if elapsed < 0.0 {
        return 0.0;
    }
    elapsed * 2.5 * (1.0 + elapsed / 100.0)
}

/// Arctic and Antarctic sea ice extent as linear declines with a floor.
pub struct SyntheticIceExtent;

impl TableSource for SyntheticIceExtent {
    fn name(&self) -> &'static str {
        "ice_extent"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let mut table = DataTable::new(None, &[ARCTIC_ICE, ANTARCTIC_ICE, TOTAL_ICE]);
        for year in ctx.years_from(ICE_START).iter() {
            let elapsed = f64::from(year - ICE_START);
            let arctic = (ARCTIC_BASE * (1.0 - ARCTIC_DECLINE * elapsed)
                + gaussian(ctx.rng(), 0.3))
            .max(ARCTIC_FLOOR);
            let antarctic = (ANTARCTIC_BASE * (1.0 - ANTARCTIC_DECLINE * elapsed)
                + gaussian(ctx.rng(), 0.5))
            .max(ANTARCTIC_FLOOR);
            table.push(
                year,
                None,
                vec![arctic.into(), antarctic.into(), (arctic + antarctic).into()],
            )?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GenContext {
        GenContext::seeded(7, 2024)
    }

    #[test]
    fn temperature_spans_the_record_and_warms() {
        let table = SyntheticTemperature.produce(&mut ctx()).unwrap();
        assert_eq!(table.len(), (2024 - 1880 + 1) as usize);
        let col = table.column(TEMPERATURE_ANOMALY).unwrap();
        let early: f64 = col[..20].iter().flatten().sum::<f64>() / 20.0;
        let late: f64 = col[col.len() - 20..].iter().flatten().sum::<f64>() / 20.0;
        assert!(early < 0.0, "early mean {early}");
        assert!(late > 0.5, "late mean {late}");
    }

    #[test]
    fn sea_level_is_non_negative() {
        let table = SyntheticSeaLevel.produce(&mut ctx()).unwrap();
        assert_eq!(table.rows()[0].year, 1970);
        assert!(table
            .column(SEA_LEVEL_RISE_MM)
            .unwrap()
            .iter()
            .all(|v| v.unwrap() >= 0.0));
        assert_eq!(sea_level_rise(1960), 0.0);
        assert!((sea_level_rise(1980) - 27.5).abs() < 1e-9);
    }

    #[test]
    fn ice_respects_floors_and_total() {
        let table = SyntheticIceExtent.produce(&mut ctx()).unwrap();
        for i in 0..table.len() {
            let arctic = table.value(i, ARCTIC_ICE).and_then(|v| v.as_f64()).unwrap();
            let antarctic = table.value(i, ANTARCTIC_ICE).and_then(|v| v.as_f64()).unwrap();
            let total = table.value(i, TOTAL_ICE).and_then(|v| v.as_f64()).unwrap();
            assert!(arctic >= ARCTIC_FLOOR);
            assert!(antarctic >= ANTARCTIC_FLOOR);
            assert!((total - arctic - antarctic).abs() < 1e-9);
        }
    }
}
