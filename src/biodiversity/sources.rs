//! Synthetic biodiversity sources.

use rand::Rng;

use crate::common::error::PulseResult;
use crate::series::noise::{bounded, gaussian, uniform, Bounds};
use crate::series::{expand, CompoundingSeries, GenContext, KeyedSeries};
use crate::table::domain::{DataTable, DimensionKind, Value, YearRange};
use crate::table::pipeline::TableSource;

use super::domain::{
    ENDANGERED_FIELDS, ENDANGERED_SIGMA, HABITAT_FIELDS, HABITAT_SIGMA, PROFILES,
    SPECIES_FIELDS, START_YEAR,
};

/// Described species at the end of 1999.
const KNOWN_SPECIES_BASE: f64 = 1_500_000.0;
/// Roughly 18,000 new species a year against the 1999 catalogue.
const DISCOVERY_RATE: f64 = 0.012;
const DISCOVERY_SIGMA: f64 = 0.0012;

pub fn endangered_series(base: f64, rate: f64, years: YearRange) -> CompoundingSeries {
    CompoundingSeries::growth(base, rate, ENDANGERED_SIGMA, years)
}

pub fn habitat_series(area: f64, rate: f64, years: YearRange) -> CompoundingSeries {
    CompoundingSeries::decline(area, rate, HABITAT_SIGMA, years)
}

/// Count, extinction rate and conservation index for one region-year.
pub fn endangered_row<R: Rng + ?Sized>(rng: &mut R, value: f64, elapsed: i32) -> [Value; 3] {
    let count = value.floor();
    let extinction = count * uniform(rng, 0.001, 0.003);
    let conservation = bounded(rng, 70.0 - f64::from(elapsed) * 0.5, 2.0, Bounds::INDEX);
    [count.into(), extinction.into(), conservation.into()]
}

/// Remaining area, area lost this year and fragmentation for one region-year.
pub fn habitat_row<R: Rng + ?Sized>(
    rng: &mut R,
    remaining: f64,
    effective_rate: f64,
    elapsed: i32,
) -> [Value; 3] {
    let fragmentation = bounded(rng, 40.0 + f64::from(elapsed) * 0.8, 3.0, Bounds::INDEX);
    [
        remaining.into(),
        (remaining * effective_rate).into(),
        fragmentation.into(),
    ]
}

/// Chained growth of the species catalogue. Starts one year before `years`
/// so every requested year has a predecessor to difference against; the
/// discovery pace slows 1% per year and levels off at half.
pub fn discovery_series(years: YearRange) -> CompoundingSeries {
    let catalogue = YearRange::new(years.start - 1, years.end);
    CompoundingSeries::growth(KNOWN_SPECIES_BASE, DISCOVERY_RATE, DISCOVERY_SIGMA, catalogue)
        .chained()
        .with_decay(0.01, 0.5)
}

/// IUCN-style endangered counts per region.
pub struct SyntheticEndangered;

impl TableSource for SyntheticEndangered {
    fn name(&self) -> &'static str {
        "endangered_species"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let years = ctx.years_from(START_YEAR);
        let keys: Vec<KeyedSeries> = PROFILES
            .iter()
            .map(|p| KeyedSeries {
                dimension: p.region.into(),
                series: endangered_series(p.endangered_base, p.endangered_growth, years),
            })
            .collect();
        expand(
            DimensionKind::Region,
            ENDANGERED_FIELDS,
            &keys,
            ctx.rng(),
            |rng, _, point| endangered_row(rng, point.value, point.elapsed).to_vec(),
        )
    }
}

/// Remaining habitat per region under compounding loss.
pub struct SyntheticHabitat;

impl TableSource for SyntheticHabitat {
    fn name(&self) -> &'static str {
        "habitat_loss"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let years = ctx.years_from(START_YEAR);
        let keys: Vec<KeyedSeries> = PROFILES
            .iter()
            .map(|p| KeyedSeries {
                dimension: p.region.into(),
                series: habitat_series(p.habitat_area, p.habitat_loss, years),
            })
            .collect();
        expand(
            DimensionKind::Region,
            HABITAT_FIELDS,
            &keys,
            ctx.rng(),
            |rng, _, point| {
                habitat_row(rng, point.value, point.effective_rate, point.elapsed).to_vec()
            },
        )
    }
}

/// Global species discovery, keyed by year only.
pub struct SyntheticSpeciesDiscovery;

impl TableSource for SyntheticSpeciesDiscovery {
    fn name(&self) -> &'static str {
        "species_discovery"
    }

    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable> {
        let mut table = DataTable::new(None, SPECIES_FIELDS);
        let points = discovery_series(ctx.years_from(START_YEAR)).generate(ctx.rng())?;
        for pair in points.windows(2) {
            let (before, point) = (pair[0].value.floor(), pair[1].value.floor());
            let estimated = (point * (5.0 + gaussian(ctx.rng(), 0.2))).floor();
            table.push(
                pair[1].year,
                None,
                vec![(point - before).into(), point.into(), estimated.into()],
            )?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biodiversity::domain::{
        CONSERVATION_INDEX, CUMULATIVE_SPECIES, ENDANGERED_COUNT, FRAGMENTATION_INDEX,
        NEW_SPECIES, REMAINING_HABITAT,
    };
    use crate::table::domain::Region;

    fn ctx() -> GenContext {
        GenContext::seeded(21, 2024)
    }

    #[test]
    fn endangered_covers_every_region_year() {
        let table = SyntheticEndangered.produce(&mut ctx()).unwrap();
        assert_eq!(table.len(), 6 * 25);
        table.ensure_unique_keys().unwrap();
        let asia = table.filter_dimension(Region::Asia.into());
        let counts = asia.column(ENDANGERED_COUNT).unwrap();
        assert_eq!(counts[0], Some(7100.0));
        assert!(asia
            .column(CONSERVATION_INDEX)
            .unwrap()
            .iter()
            .all(|v| Bounds::INDEX.contains(v.unwrap())));
    }

    #[test]
    fn habitat_shrinks_and_stays_bounded() {
        let table = SyntheticHabitat.produce(&mut ctx()).unwrap();
        let europe = table.filter_dimension(Region::Europe.into());
        let first = europe.value(0, REMAINING_HABITAT).unwrap();
        assert_eq!(first.as_f64(), Some(950.0));
        assert!(table
            .column(FRAGMENTATION_INDEX)
            .unwrap()
            .iter()
            .all(|v| Bounds::INDEX.contains(v.unwrap())));
    }

    #[test]
    fn catalogue_grows_by_each_years_discoveries() {
        let species = SyntheticSpeciesDiscovery.produce(&mut ctx()).unwrap();
        assert_eq!(species.len(), 25);
        assert!(species.key_kind().is_none());
        assert_eq!(species.rows()[0].year, START_YEAR);
        let found: Vec<f64> = species
            .column(NEW_SPECIES)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        let known: Vec<f64> = species
            .column(CUMULATIVE_SPECIES)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        // ten noise deviations around 1.2% of the 1999 catalogue
        assert!((0.0..=36_000.0).contains(&found[0]), "{}", found[0]);
        assert_eq!(known[0], KNOWN_SPECIES_BASE + found[0]);
        for (pair, new) in known.windows(2).zip(&found[1..]) {
            assert_eq!(pair[1] - pair[0], *new);
        }
    }

    #[test]
    fn discovery_rate_decays_toward_half() {
        let series = discovery_series(YearRange::new(START_YEAR, 2100));
        let points = series.generate(ctx().rng()).unwrap();
        assert_eq!(points[0].year, START_YEAR - 1);
        assert_eq!(points[0].effective_rate, 0.0);
        assert!(points.windows(2).all(|w| w[1].value >= w[0].value));
        let decay = series.decay.unwrap();
        assert!((decay.factor(1) - 0.99).abs() < 1e-12);
        assert_eq!(decay.factor(100), 0.5);
    }
}
