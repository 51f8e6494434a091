//! Replicate one series model across an enumerated key set.

use std::collections::HashSet;

use rand::Rng;

use crate::common::error::{PulseError, PulseResult};
use crate::table::domain::{DataTable, Dimension, DimensionKind, Value};

use super::generator::{CompoundingSeries, SeriesPoint};

/// Series parameters for one dimension key.
#[derive(Copy, Clone, Debug)]
pub struct KeyedSeries {
    pub dimension: Dimension,
    pub series: CompoundingSeries,
}

/// Generate `|keys| x |years|` records, one per `(year, key)` pair.
///
/// Keys are independent: each one runs its own series, and `derive` turns
/// every point into the row's values (primary value plus derived fields).
pub fn expand<R, F>(
    kind: DimensionKind,
    fields: &[&'static str],
    keys: &[KeyedSeries],
    rng: &mut R,
    mut derive: F,
) -> PulseResult<DataTable>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R, Dimension, &SeriesPoint) -> Vec<Value>,
{
    let mut seen = HashSet::with_capacity(keys.len());
    for keyed in keys {
        if keyed.dimension.kind() != kind {
            return Err(PulseError::invalid(format!(
                "key `{}` does not belong to {}",
                keyed.dimension.as_str(),
                kind.column_name()
            )));
        }
        if !seen.insert(keyed.dimension) {
            return Err(PulseError::invalid(format!(
                "key `{}` listed twice",
                keyed.dimension.as_str()
            )));
        }
    }

    let mut table = DataTable::new(Some(kind), fields);
    for keyed in keys {
        for point in keyed.series.generate(&mut *rng)? {
            let values = derive(&mut *rng, keyed.dimension, &point);
            table.push(point.year, Some(keyed.dimension), values)?;
        }
    }
    Ok(table)
}
