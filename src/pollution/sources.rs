//! Synthetic pollution sources and the per-year formulas they share with the
//! fallback table.

use rand::Rng;

use crate::common::error::PulseResult;
use crate::series::noise::{bounded, gaussian, Bounds};
use crate::series::GenContext;
use crate::table::domain::{DataTable, Year};
use crate::table::pipeline::TableSource;

use super::domain::{AIR_FIELDS, GAS_FIELDS, GAS_START, MONITORING_START, PLASTIC_FIELDS};

const OZONE_BOUNDS: Bounds = Bounds::new(30.0, 60.0);

/// CO2 in ppm: 1.5 ppm/yr since 1960, accelerating after 2000.
pub fn co2_ppm<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    let mut base = 315.0 + f64::from(year - GAS_START) * 1.5;
    if year > 2000 {
        base += f64::from(year - 2000) * 0.2;
    }
    base + gaussian(rng, 0.5)
}

/// Methane in ppb, capped at 1900 before noise.
pub fn methane_ppb<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    (1600.0 + f64::from(year - GAS_START) * 4.0).min(1900.0) + gaussian(rng, 10.0)
}

/// Nitrous oxide in ppb, capped at 335 before noise.
pub fn nitrous_oxide_ppb<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    (290.0 + f64::from(year - GAS_START) * 0.6).min(335.0) + gaussian(rng, 1.0)
}

/// PM2.5 in µg/m³: rising until 2010, improving afterwards.
pub fn pm25<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    let base = if year < 2010 {
        25.0 + f64::from(year - MONITORING_START) * 0.4
    } else {
        33.0 - f64::from(year - 2010) * 0.3
    };
    (base + gaussian(rng, 1.5)).max(10.0)
}

pub fn ozone_ppb<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    bounded(
        rng,
        40.0 + f64::from(year - MONITORING_START) * 0.2,
        2.0,
        OZONE_BOUNDS,
    )
}

pub fn air_quality_index(pm25: f64, ozone: f64) -> f64 {
    pm25 * 0.8 + ozone * 0.2
}

/// Ocean plastic in million tonnes; noise widens with elapsed years.
pub fn ocean_plastic<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    let elapsed = f64::from(year - MONITORING_START);
    (elapsed.powf(1.5) + gaussian(rng, elapsed * 0.05)).max(0.0)
}

/// Microplastic particles per m³, never below the 1990 baseline of 50.
pub fn microplastic<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    let elapsed = f64::from(year - MONITORING_START);
    (50.0 + elapsed.powf(1.8) + gaussian(rng, elapsed * 0.1)).max(50.0)
}

pub fn chemical_index<R: Rng + ?Sized>(rng: &mut R, year: Year) -> f64 {
    bounded(
        rng,
        30.0 + f64::from(year - MONITORING_START) * 0.6,
        3.0,
        Bounds::INDEX,
    )
}

/// CO2, methane and nitrous oxide since 1960.
pub struct SyntheticGreenhouseGases;

impl TableSource for SyntheticGreenhouseGases {
    fn name(&self) -> &'static str {
        "greenhouse_gases"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let mut table = DataTable::new(None, GAS_FIELDS);
        for year in ctx.years_from(GAS_START).iter() {
            let rng = ctx.rng();
            let co2 = co2_ppm(rng, year);
            let ch4 = methane_ppb(rng, year);
            let n2o = nitrous_oxide_ppb(rng, year);
            table.push(year, None, vec![co2.into(), ch4.into(), n2o.into()])?;
        }
        Ok(table)
    }
}

/// PM2.5, ozone and the combined index since 1990.
pub struct SyntheticAirQuality;

impl TableSource for SyntheticAirQuality {
    fn name(&self) -> &'static str {
        "air_quality"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let mut table = DataTable::new(None, AIR_FIELDS);
        for year in ctx.years_from(MONITORING_START).iter() {
            let rng = ctx.rng();
            let pm = pm25(rng, year);
            let o3 = ozone_ppb(rng, year);
            table.push(
                year,
                None,
                vec![pm.into(), o3.into(), air_quality_index(pm, o3).into()],
            )?;
        }
        Ok(table)
    }
}

/// Ocean plastic, microplastics and the chemical index since 1990.
pub struct SyntheticPlastics;

impl TableSource for SyntheticPlastics {
    fn name(&self) -> &'static str {
        "plastics"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let mut table = DataTable::new(None, PLASTIC_FIELDS);
        for year in ctx.years_from(MONITORING_START).iter() {
            let rng = ctx.rng();
            let ocean = ocean_plastic(rng, year);
            let micro = microplastic(rng, year);
            let chem = chemical_index(rng, year);
            table.push(year, None, vec![ocean.into(), micro.into(), chem.into()])?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn formulas_respect_floors_and_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for year in 1990..=2024 {
            assert!(pm25(&mut rng, year) >= 10.0);
            assert!(OZONE_BOUNDS.contains(ozone_ppb(&mut rng, year)));
            assert!(ocean_plastic(&mut rng, year) >= 0.0);
            assert!(microplastic(&mut rng, year) >= 50.0);
            assert!(Bounds::INDEX.contains(chemical_index(&mut rng, year)));
        }
    }

    #[test]
    fn co2_rises_by_decade() {
        let mut rng = StdRng::seed_from_u64(5);
        let c1960 = co2_ppm(&mut rng, 1960);
        let c2020 = co2_ppm(&mut rng, 2020);
        assert!((c1960 - 315.0).abs() < 3.0);
        assert!((c2020 - 409.0).abs() < 3.0);
    }

    #[test]
    fn sources_cover_their_ranges() {
        let mut ctx = GenContext::seeded(5, 2024);
        assert_eq!(SyntheticGreenhouseGases.produce(&mut ctx).unwrap().len(), 65);
        assert_eq!(SyntheticAirQuality.produce(&mut ctx).unwrap().len(), 35);
        assert_eq!(SyntheticPlastics.produce(&mut ctx).unwrap().len(), 35);
    }
}
