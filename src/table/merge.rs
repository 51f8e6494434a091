//! Join, fill, categorise, sort and truncate.
//!
//! Joins build a fresh table keyed by `(year, dimension)`; the caller decides
//! which sources participate and in which order.

use std::collections::{BTreeMap, HashMap};

// TODO: Interpolate interior gaps of sparse sources instead of carrying the
// last value forward.

use crate::common::error::{PulseError, PulseResult};

use super::domain::{DataTable, Dimension, MetricRecord, Value, Year};

/// Outer join on the full key set.
///
/// Both tables must carry the same key kind. Columns present in both are
/// coalesced: the left value wins when present.
pub fn outer_join(left: DataTable, right: DataTable) -> PulseResult<DataTable> {
    if left.key_kind() != right.key_kind() {
        return Err(PulseError::schema(format!(
            "outer join needs matching keys, got {:?} and {:?}",
            left.key_kind(),
            right.key_kind()
        )));
    }
    left.ensure_unique_keys()?;
    right.ensure_unique_keys()?;

    let mut out = DataTable::new(left.key_kind(), left.fields());
    for f in left.fields() {
        if !left.has_field(f) {
            out.mark_unavailable(f);
        }
    }
    let targets: Vec<usize> = right
        .fields()
        .iter()
        .map(|&f| out.add_field(f, right.has_field(f)))
        .collect();
    let width = out.fields().len();

    let mut merged: BTreeMap<(Year, Option<Dimension>), Vec<Value>> = BTreeMap::new();
    for row in left.rows() {
        let mut values = row.values.clone();
        values.resize(width, Value::Unavailable);
        merged.insert(row.key(), values);
    }
    for row in right.rows() {
        let slot = merged
            .entry(row.key())
            .or_insert_with(|| vec![Value::Unavailable; width]);
        for (value, &target) in row.values.iter().zip(&targets) {
            if !slot[target].is_present() {
                slot[target] = value.clone();
            }
        }
    }

    let rows = out.rows_mut();
    for ((year, dimension), values) in merged {
        rows.push(MetricRecord {
            year,
            dimension,
            values,
        });
    }
    Ok(out)
}

/// Left join of a year-keyed auxiliary table onto `base`.
///
/// Auxiliary values are broadcast to every dimension row of the same year.
/// Base rows are kept in their order; years missing from `aux` get
/// `Unavailable`.
pub fn left_join_on_year(base: DataTable, aux: &DataTable) -> PulseResult<DataTable> {
    if aux.key_kind().is_some() {
        return Err(PulseError::schema(
            "auxiliary table for a year join must be keyed by year only",
        ));
    }
    if let Some(clash) = aux.fields().iter().find(|f| base.field_index(f).is_some()) {
        return Err(PulseError::schema(format!(
            "column `{clash}` exists on both sides of the year join"
        )));
    }

    let mut by_year: HashMap<Year, &[Value]> = HashMap::with_capacity(aux.len());
    for row in aux.rows() {
        if by_year.insert(row.year, row.values.as_slice()).is_some() {
            return Err(PulseError::schema(format!(
                "auxiliary table repeats year {}",
                row.year
            )));
        }
    }

    let mut out = base;
    let first_new = out.fields().len();
    for &f in aux.fields() {
        out.add_field(f, aux.has_field(f));
    }
    for row in out.rows_mut() {
        if let Some(values) = by_year.get(&row.year) {
            row.values.truncate(first_new);
            row.values.extend(values.iter().cloned());
        }
    }
    Ok(out)
}

/// Forward-fill gaps within each column.
///
/// Rows are visited in ascending year order, separately for every dimension
/// key. A missing value takes the last present value of the same key; values
/// never propagate to years before their first appearance.
pub fn forward_fill(table: &mut DataTable) {
    let width = table.fields().len();
    let rows = table.rows_mut();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by_key(|&i| (rows[i].dimension, rows[i].year));

    let mut current: Option<Option<Dimension>> = None;
    let mut last: Vec<Option<Value>> = vec![None; width];
    for i in order {
        let row = &mut rows[i];
        if current != Some(row.dimension) {
            current = Some(row.dimension);
            last.iter_mut().for_each(|slot| *slot = None);
        }
        for (cell, memo) in row.values.iter_mut().zip(last.iter_mut()) {
            if cell.is_present() {
                *memo = Some(cell.clone());
            } else if let Some(seen) = memo {
                *cell = seen.clone();
            }
        }
    }
}

/// Tag emitted when any of `fields` holds a value in a row.
#[derive(Copy, Clone, Debug)]
pub struct CategoryRule {
    pub tag: &'static str,
    pub fields: &'static [&'static str],
}

/// Label used when no rule matches.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Derive a label column from which raw fields are populated.
///
/// Matching tags are comma-joined in rule order without repeats.
pub fn categorize(table: &mut DataTable, target: &'static str, rules: &[CategoryRule]) {
    let indices: Vec<(&'static str, Vec<usize>)> = rules
        .iter()
        .map(|rule| {
            let idx = rule
                .fields
                .iter()
                .filter_map(|f| table.field_index(f))
                .collect();
            (rule.tag, idx)
        })
        .collect();
    let target_idx = table.add_field(target, true);

    for row in table.rows_mut() {
        let mut tags: Vec<&str> = Vec::new();
        for (tag, idx) in &indices {
            let hit = idx.iter().any(|&i| row.values[i].is_present());
            if hit && !tags.contains(tag) {
                tags.push(*tag);
            }
        }
        let label = if tags.is_empty() {
            UNCLASSIFIED.to_string()
        } else {
            tags.join(",")
        };
        row.values[target_idx] = Value::Label(label);
    }
}

/// Year descending, then dimension ascending.
pub fn sort_rows(table: &mut DataTable) {
    table
        .rows_mut()
        .sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.dimension.cmp(&b.dimension)));
}

/// Keep the first `limit` rows, or everything when `limit` is `None`.
pub fn truncate(table: &mut DataTable, limit: Option<usize>) {
    if let Some(limit) = limit {
        table.rows_mut().truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::domain::{DimensionKind, Region};

    fn yearly(field: &'static str, points: &[(Year, f64)]) -> DataTable {
        let mut t = DataTable::new(None, &[field]);
        for &(y, v) in points {
            t.push(y, None, vec![v.into()]).unwrap();
        }
        t
    }

    fn regional(field: &'static str, points: &[(Year, Region, f64)]) -> DataTable {
        let mut t = DataTable::new(Some(DimensionKind::Region), &[field]);
        for &(y, r, v) in points {
            t.push(y, Some(r.into()), vec![v.into()]).unwrap();
        }
        t
    }

    #[test]
    fn outer_join_keeps_keys_from_both_sides() {
        let a = regional("a", &[(2000, Region::Asia, 1.0), (2001, Region::Asia, 2.0)]);
        let b = regional("b", &[(2001, Region::Asia, 20.0), (2002, Region::Asia, 30.0)]);
        let joined = outer_join(a, b).unwrap();
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.column("a").unwrap(), vec![Some(1.0), Some(2.0), None]);
        assert_eq!(joined.column("b").unwrap(), vec![None, Some(20.0), Some(30.0)]);
    }

    #[test]
    fn outer_join_coalesces_shared_columns() {
        let a = regional("area", &[(2000, Region::Asia, 1.0)]);
        let b = regional("area", &[(2000, Region::Asia, 9.0), (2000, Region::Europe, 5.0)]);
        let joined = outer_join(a, b).unwrap();
        assert_eq!(joined.fields(), &["area"]);
        assert_eq!(joined.column("area").unwrap(), vec![Some(1.0), Some(5.0)]);
    }

    #[test]
    fn outer_join_rejects_mixed_keys() {
        let a = regional("a", &[(2000, Region::Asia, 1.0)]);
        let b = yearly("b", &[(2000, 1.0)]);
        assert!(matches!(outer_join(a, b), Err(PulseError::Schema(_))));
    }

    #[test]
    fn year_join_broadcasts_to_every_region() {
        let base = regional(
            "a",
            &[(2000, Region::Asia, 1.0), (2000, Region::Europe, 2.0), (2001, Region::Asia, 3.0)],
        );
        let aux = yearly("g", &[(2000, 7.0)]);
        let joined = left_join_on_year(base, &aux).unwrap();
        assert_eq!(joined.column("g").unwrap(), vec![Some(7.0), Some(7.0), None]);
        assert!(joined.has_field("g"));
    }

    #[test]
    fn year_join_rejects_regional_aux_and_clashes() {
        let base = yearly("a", &[(2000, 1.0)]);
        let aux = regional("g", &[(2000, Region::Asia, 1.0)]);
        assert!(left_join_on_year(base.clone(), &aux).is_err());
        assert!(left_join_on_year(base.clone(), &yearly("a", &[(2000, 2.0)])).is_err());
        assert!(left_join_on_year(base, &yearly("g", &[(2000, 1.0), (2000, 2.0)])).is_err());
    }

    #[test]
    fn forward_fill_never_fills_backwards() {
        let base = yearly("a", &[(1998, 1.0), (1999, 2.0), (2000, 3.0), (2001, 4.0)]);
        let aux = yearly("b", &[(1999, 10.0)]);
        let mut t = left_join_on_year(base, &aux).unwrap();
        forward_fill(&mut t);
        assert_eq!(t.column("b").unwrap(), vec![None, Some(10.0), Some(10.0), Some(10.0)]);
    }

    #[test]
    fn forward_fill_stays_within_a_dimension() {
        let mut t = DataTable::new(Some(DimensionKind::Region), &["a"]);
        t.push(2000, Some(Region::Asia.into()), vec![1.0.into()]).unwrap();
        t.push(2001, Some(Region::Asia.into()), vec![Value::Unavailable]).unwrap();
        t.push(2001, Some(Region::Europe.into()), vec![Value::Unavailable]).unwrap();
        forward_fill(&mut t);
        assert_eq!(t.column("a").unwrap(), vec![Some(1.0), Some(1.0), None]);
    }

    #[test]
    fn categories_follow_populated_fields() {
        static AIR: &[&str] = &["co2", "pm25"];
        static WATER: &[&str] = &["plastic"];
        let rules = [
            CategoryRule { tag: "Air", fields: AIR },
            CategoryRule { tag: "Water", fields: WATER },
        ];
        let mut t = DataTable::new(None, &["co2", "plastic"]);
        t.push(2000, None, vec![1.0.into(), 2.0.into()]).unwrap();
        t.push(1980, None, vec![1.0.into(), Value::Unavailable]).unwrap();
        t.push(1970, None, vec![Value::Unavailable, Value::Unavailable]).unwrap();
        categorize(&mut t, "category", &rules);
        assert_eq!(
            t.labels("category").unwrap(),
            vec![Some("Air,Water"), Some("Air"), Some(UNCLASSIFIED)]
        );
        assert!(t.has_field("category"));
    }

    #[test]
    fn sort_then_truncate() {
        let mut t = DataTable::new(Some(DimensionKind::Region), &["a"]);
        t.push(2000, Some(Region::Europe.into()), vec![1.0.into()]).unwrap();
        t.push(2001, Some(Region::Europe.into()), vec![2.0.into()]).unwrap();
        t.push(2001, Some(Region::Africa.into()), vec![3.0.into()]).unwrap();
        sort_rows(&mut t);
        let keys: Vec<_> = t.rows().iter().map(|r| r.key()).collect();
        assert_eq!(
            keys,
            vec![
                (2001, Some(Region::Africa.into())),
                (2001, Some(Region::Europe.into())),
                (2000, Some(Region::Europe.into())),
            ]
        );
        truncate(&mut t, Some(2));
        assert_eq!(t.len(), 2);
        truncate(&mut t, None);
        assert_eq!(t.len(), 2);
    }
}
