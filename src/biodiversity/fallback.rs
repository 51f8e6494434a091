//! Region table built straight from the hardcoded profiles.

use crate::common::error::PulseResult;
use crate::series::GenContext;
use crate::table::domain::{DataTable, DimensionKind, Value};

use super::domain::{FIELDS, PROFILES, SPECIES_FIELDS, START_YEAR};
use super::sources::{endangered_row, endangered_series, habitat_row, habitat_series};

/// Endangered and habitat columns for every region. Species discovery is not
/// modelled here, so those columns are unavailable.
pub fn synthesize(ctx: &mut GenContext) -> PulseResult<DataTable> {
    let years = ctx.years_from(START_YEAR);
    let mut table = DataTable::new(Some(DimensionKind::Region), FIELDS);
    for field in SPECIES_FIELDS {
        table.mark_unavailable(field);
    }
    for profile in &PROFILES {
        let rng = ctx.rng();
        let endangered =
            endangered_series(profile.endangered_base, profile.endangered_growth, years)
                .sample(rng);
        let habitat = habitat_series(profile.habitat_area, profile.habitat_loss, years).sample(rng);
        for (e, h) in endangered.iter().zip(&habitat) {
            let mut values: Vec<Value> = Vec::with_capacity(FIELDS.len());
            values.extend(endangered_row(rng, e.value, e.elapsed));
            values.extend(habitat_row(rng, h.value, h.effective_rate, h.elapsed));
            values.extend(std::iter::repeat(Value::Unavailable).take(SPECIES_FIELDS.len()));
            table.push(e.year, Some(profile.region.into()), values)?;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biodiversity::domain::{ENDANGERED_COUNT, NEW_SPECIES};

    #[test]
    fn region_rows_without_species_columns() {
        let mut ctx = GenContext::seeded(4, 2024);
        let table = synthesize(&mut ctx).unwrap();
        assert_eq!(table.len(), 150);
        table.ensure_unique_keys().unwrap();
        assert!(table.has_field(ENDANGERED_COUNT));
        assert!(!table.has_field(NEW_SPECIES));
        assert_eq!(table.fields(), FIELDS);
    }
}
