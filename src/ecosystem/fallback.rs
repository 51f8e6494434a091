//! All four ecosystem types in one pass, without the per-type sources.

use crate::common::error::PulseResult;
use crate::series::GenContext;
use crate::table::domain::{DataTable, DimensionKind, Value};

use super::domain::{fields_for, FIELDS, PROFILES, START_YEAR};
use super::sources::derive_row;

/// Place a per-type row into the full column set.
fn widen(own: &[&str], values: Vec<Value>) -> Vec<Value> {
    let mut row = vec![Value::Unavailable; FIELDS.len()];
    for (name, value) in own.iter().zip(values) {
        if let Some(idx) = FIELDS.iter().position(|f| f == name) {
            row[idx] = value;
        }
    }
    row
}

pub fn synthesize(ctx: &mut GenContext) -> PulseResult<DataTable> {
    let years = ctx.years_from(START_YEAR);
    let mut table = DataTable::new(Some(DimensionKind::EcosystemType), FIELDS);
    for profile in PROFILES.iter() {
        let rng = ctx.rng();
        for point in profile.series(years).sample(rng) {
            let values = derive_row(rng, profile.kind, &point);
            table.push(
                point.year,
                Some(profile.kind.into()),
                widen(fields_for(profile.kind), values),
            )?;
        }
    }
    Ok(table)
}
