use planetary_pulse::biodiversity::domain::{
    CONSERVATION_INDEX, ENDANGERED_COUNT, FRAGMENTATION_INDEX,
};
use planetary_pulse::biodiversity::{get_biodiversity_data_with, BiodiversitySources};
use planetary_pulse::climate::domain::TEMPERATURE_ANOMALY;
use planetary_pulse::climate::{get_climate_data_with, ClimateSources};
use planetary_pulse::ecosystem::domain::{DESERTIFICATION_RISK, HEALTH_INDEX};
use planetary_pulse::ecosystem::{get_ecosystem_data_with, EcosystemSources};
use planetary_pulse::pollution::domain::{
    OCEAN_PLASTIC, OZONE_LEVEL, PM25_LEVEL, POLLUTANT_CATEGORY, SOIL_POLLUTANTS,
    WATER_POLLUTANTS,
};
use planetary_pulse::pollution::{get_pollution_data_with, PollutionSources};
use planetary_pulse::table::{DataTable, DisabledSource, Region};
use planetary_pulse::{Domain, GenContext, Session};

const YEAR: i32 = 2024;

fn session() -> Session {
    Session::new(20_240_101).with_current_year(YEAR)
}

fn first_year(domain: Domain) -> i32 {
    match domain {
        Domain::Climate => 1880,
        Domain::Biodiversity => 2000,
        Domain::Pollution => 1960,
        Domain::Ecosystem => 1990,
    }
}

fn assert_sorted(table: &DataTable) {
    for pair in table.rows().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.year > b.year || (a.year == b.year && a.dimension < b.dimension),
            "rows out of order: {:?} before {:?}",
            a.key(),
            b.key()
        );
    }
}

fn index_column_in_range(table: &DataTable, field: &str) {
    for v in table.column(field).unwrap().into_iter().flatten() {
        assert!((0.0..=100.0).contains(&v), "{field} = {v}");
    }
}

#[test]
fn limit_returns_sorted_head_for_every_domain() {
    let s = session();
    for domain in Domain::ALL {
        let full = s.get(domain, None);
        assert!(!full.is_empty());
        assert_sorted(&full);
        for n in [0, 1, 5, full.len(), full.len() + 10] {
            let head = s.get(domain, Some(n));
            assert_eq!(head.len(), n.min(full.len()), "{domain} limit {n}");
            assert_eq!(head.rows(), &full.rows()[..head.len()]);
        }
    }
}

#[test]
fn years_stay_in_documented_ranges() {
    let s = session();
    for domain in Domain::ALL {
        let table = s.get(domain, None);
        let lo = first_year(domain);
        assert!(table.rows().iter().all(|r| (lo..=YEAR).contains(&r.year)));
    }
}

#[test]
fn dimension_keys_are_unique() {
    let s = session();
    s.biodiversity(None).ensure_unique_keys().unwrap();
    s.ecosystem(None).ensure_unique_keys().unwrap();
}

#[test]
fn forward_fill_never_reaches_back_before_first_value() {
    let table = session().pollution(None);
    for field in [PM25_LEVEL, OZONE_LEVEL, OCEAN_PLASTIC] {
        let column = table.column(field).unwrap();
        for (row, value) in table.rows().iter().zip(column) {
            if row.year < 1990 {
                assert!(value.is_none(), "{field} filled back into {}", row.year);
            } else {
                assert!(value.is_some(), "{field} missing in {}", row.year);
            }
        }
    }
}

#[test]
fn clamped_indices_hold() {
    let s = session();
    let bio = s.biodiversity(None);
    index_column_in_range(&bio, CONSERVATION_INDEX);
    index_column_in_range(&bio, FRAGMENTATION_INDEX);
    let eco = s.ecosystem(None);
    index_column_in_range(&eco, HEALTH_INDEX);
    index_column_in_range(&eco, DESERTIFICATION_RISK);
}

#[test]
fn climate_head_has_temperature() {
    let table = session().climate(Some(5));
    assert_eq!(table.len(), 5);
    assert_eq!(table.rows()[0].year, YEAR);
    assert!(table.has_field(TEMPERATURE_ANOMALY));
    let temps = table.column(TEMPERATURE_ANOMALY).unwrap();
    assert!(temps.iter().all(Option::is_some));
}

#[test]
fn pre_monitoring_pollution_rows_are_air_only() {
    let table = session().pollution(None);
    let labels = table.labels(POLLUTANT_CATEGORY).unwrap();
    for (row, label) in table.rows().iter().zip(labels) {
        if row.year < 1990 {
            let label = label.unwrap();
            assert!(!label.contains(WATER_POLLUTANTS));
            assert!(!label.contains(SOIL_POLLUTANTS));
        }
    }
}

#[test]
fn africa_endangered_count_grows() {
    let table = session().biodiversity(None);
    let africa = table.filter_dimension(Region::Africa.into());
    // rows are newest first
    let counts: Vec<f64> = africa
        .column(ENDANGERED_COUNT)
        .unwrap()
        .into_iter()
        .rev()
        .map(Option::unwrap)
        .collect();
    assert_eq!(counts.len(), 25);
    assert_eq!(counts[0], 5200.0);
    for (elapsed, count) in counts.iter().enumerate() {
        let n = elapsed as i32;
        // five noise deviations either side of the 3% rate
        let low = (5200.0 * 1.005f64.powi(n)).floor();
        let high = 5200.0 * 1.055f64.powi(n);
        assert!((low..=high).contains(count), "year {elapsed}: {count}");
    }
    assert!(counts[24] > counts[0] * 1.2);
}

#[test]
fn disabling_every_source_keeps_the_schema() {
    let s = session();

    let climate = get_climate_data_with(
        &ClimateSources {
            temperature: Box::new(DisabledSource::new("temperature")),
            sea_level: Box::new(DisabledSource::new("sea_level")),
            ice: Box::new(DisabledSource::new("ice_extent")),
        },
        &mut s.context(Domain::Climate),
        None,
    );
    let biodiversity = get_biodiversity_data_with(
        &BiodiversitySources {
            endangered: Box::new(DisabledSource::new("endangered_species")),
            habitat: Box::new(DisabledSource::new("habitat_loss")),
            species: Box::new(DisabledSource::new("species_discovery")),
        },
        &mut s.context(Domain::Biodiversity),
        None,
    );
    let pollution = get_pollution_data_with(
        &PollutionSources {
            gases: Box::new(DisabledSource::new("greenhouse_gases")),
            air: Box::new(DisabledSource::new("air_quality")),
            plastics: Box::new(DisabledSource::new("plastics")),
        },
        &mut s.context(Domain::Pollution),
        None,
    );
    let ecosystem = get_ecosystem_data_with(
        &EcosystemSources {
            forest: Box::new(DisabledSource::new("forest")),
            coral: Box::new(DisabledSource::new("coral_reef")),
            wetland: Box::new(DisabledSource::new("wetland")),
            soil: Box::new(DisabledSource::new("soil")),
        },
        &mut s.context(Domain::Ecosystem),
        None,
    );

    let degraded = [climate, biodiversity, pollution, ecosystem];
    for (domain, table) in Domain::ALL.into_iter().zip(degraded) {
        let healthy = s.get(domain, None);
        assert!(!table.is_empty(), "{domain} fallback is empty");
        assert_eq!(table.fields(), healthy.fields(), "{domain} schema differs");
        assert_eq!(table.key_kind(), healthy.key_kind());
        assert_sorted(&table);
    }
}

#[test]
fn stale_clock_still_yields_rows() {
    let mut ctx = GenContext::seeded(1, 1900);
    let table = planetary_pulse::get_biodiversity_data(&mut ctx, None);
    assert!(!table.is_empty());
}
