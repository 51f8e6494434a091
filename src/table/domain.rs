//! Core table definitions: keys, cells, records and the long-format table.
//!
//! A [`DataTable`] always carries the full column set of its domain. Columns
//! whose source was unavailable stay in the schema but are not *available*;
//! [`DataTable::has_field`] is the capability query consumers use before
//! charting a column.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::common::error::{PulseError, PulseResult};

/// Calendar year, the primary key of every record.
pub type Year = i32;

/// Inclusive span of years.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start + 1) as usize
        }
    }

    pub fn contains(&self, year: Year) -> bool {
        (self.start..=self.end).contains(&year)
    }

    pub fn iter(&self) -> impl Iterator<Item = Year> {
        self.start..=self.end
    }
}

/// The four environmental topic areas.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Domain {
    Climate,
    Biodiversity,
    Pollution,
    Ecosystem,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Climate,
        Domain::Biodiversity,
        Domain::Pollution,
        Domain::Ecosystem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Climate => "climate",
            Domain::Biodiversity => "biodiversity",
            Domain::Pollution => "pollution",
            Domain::Ecosystem => "ecosystem",
        }
    }

    /// Stable numeric code used by the C ABI.
    pub fn code(&self) -> u32 {
        match self {
            Domain::Climate => 0,
            Domain::Biodiversity => 1,
            Domain::Pollution => 2,
            Domain::Ecosystem => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    /// Mixed into the session seed so domains draw independent streams.
    pub fn salt(&self) -> u64 {
        match self {
            Domain::Climate => 0x9E37_79B9_7F4A_7C15,
            Domain::Biodiversity => 0xBF58_476D_1CE4_E5B9,
            Domain::Pollution => 0x94D0_49BB_1331_11EB,
            Domain::Ecosystem => 0xD6E8_FEB8_6659_FD93,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Continental regions used by the biodiversity domain.
///
/// Variants are declared in alphabetical order of their display names, so the
/// derived `Ord` matches the ascending sort of the region column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Region {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Asia,
        Region::Europe,
        Region::NorthAmerica,
        Region::Oceania,
        Region::SouthAmerica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Oceania => "Oceania",
            Region::SouthAmerica => "South America",
        }
    }
}

impl FromStr for Region {
    type Err = PulseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| PulseError::invalid(format!("unknown region `{value}`")))
    }
}

/// Ecosystem categories, alphabetical like [`Region`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum EcosystemType {
    CoralReefs,
    Forests,
    Grasslands,
    Wetlands,
}

impl EcosystemType {
    pub const ALL: [EcosystemType; 4] = [
        EcosystemType::CoralReefs,
        EcosystemType::Forests,
        EcosystemType::Grasslands,
        EcosystemType::Wetlands,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EcosystemType::CoralReefs => "Coral Reefs",
            EcosystemType::Forests => "Forests",
            EcosystemType::Grasslands => "Grasslands",
            EcosystemType::Wetlands => "Wetlands",
        }
    }
}

impl FromStr for EcosystemType {
    type Err = PulseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| PulseError::invalid(format!("unknown ecosystem type `{value}`")))
    }
}

/// Which categorical key a table carries besides the year.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DimensionKind {
    Region,
    EcosystemType,
}

impl DimensionKind {
    /// Name of the key column in serialized rows.
    pub fn column_name(&self) -> &'static str {
        match self {
            DimensionKind::Region => "region",
            DimensionKind::EcosystemType => "ecosystem_type",
        }
    }

    /// Every key of this kind, in ascending order.
    pub fn keys(&self) -> Vec<Dimension> {
        match self {
            DimensionKind::Region => Region::ALL.into_iter().map(Dimension::Region).collect(),
            DimensionKind::EcosystemType => EcosystemType::ALL
                .into_iter()
                .map(Dimension::Ecosystem)
                .collect(),
        }
    }
}

/// Secondary key of a record.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Dimension {
    Region(Region),
    Ecosystem(EcosystemType),
}

impl Dimension {
    pub fn kind(&self) -> DimensionKind {
        match self {
            Dimension::Region(_) => DimensionKind::Region,
            Dimension::Ecosystem(_) => DimensionKind::EcosystemType,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Region(r) => r.as_str(),
            Dimension::Ecosystem(t) => t.as_str(),
        }
    }
}

impl From<Region> for Dimension {
    fn from(value: Region) -> Self {
        Dimension::Region(value)
    }
}

impl From<EcosystemType> for Dimension {
    fn from(value: EcosystemType) -> Self {
        Dimension::Ecosystem(value)
    }
}

/// One cell of a record.
///
/// `Unavailable` means the value was never produced (absent source, or a year
/// before the source starts); it is distinct from a measured zero.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Present(f64),
    Label(String),
    Unavailable,
}

impl Value {
    pub fn is_present(&self) -> bool {
        !matches!(self, Value::Unavailable)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Present(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Value::Label(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Present(value)
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Value::Unavailable, Value::Present)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Present(v) if v.is_finite() => serializer.serialize_f64(*v),
            Value::Label(s) => serializer.serialize_str(s),
            _ => serializer.serialize_none(),
        }
    }
}

/// Row keyed by year and optional dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRecord {
    pub year: Year,
    pub dimension: Option<Dimension>,
    pub values: Vec<Value>,
}

impl MetricRecord {
    pub fn key(&self) -> (Year, Option<Dimension>) {
        (self.year, self.dimension)
    }
}

/// Static description of a domain's table shape.
#[derive(Copy, Clone, Debug)]
pub struct DomainSchema {
    pub domain: Domain,
    pub key: Option<DimensionKind>,
    pub fields: &'static [&'static str],
    pub first_year: Year,
}

/// Ordered collection of records sharing one schema.
#[derive(Clone, Debug, PartialEq)]
pub struct DataTable {
    key: Option<DimensionKind>,
    fields: Vec<&'static str>,
    available: BTreeSet<&'static str>,
    rows: Vec<MetricRecord>,
}

impl DataTable {
    /// Empty table whose fields are all available.
    pub fn new(key: Option<DimensionKind>, fields: &[&'static str]) -> Self {
        Self {
            key,
            fields: fields.to_vec(),
            available: fields.iter().copied().collect(),
            rows: Vec::new(),
        }
    }

    /// One all-unavailable row per key and year of the schema.
    pub fn skeleton(schema: &DomainSchema, years: YearRange) -> Self {
        let mut table = Self {
            key: schema.key,
            fields: schema.fields.to_vec(),
            available: BTreeSet::new(),
            rows: Vec::new(),
        };
        let dimensions: Vec<Option<Dimension>> = match schema.key {
            Some(kind) => kind.keys().into_iter().map(Some).collect(),
            None => vec![None],
        };
        for year in years.iter() {
            for dimension in &dimensions {
                table.rows.push(MetricRecord {
                    year,
                    dimension: *dimension,
                    values: vec![Value::Unavailable; schema.fields.len()],
                });
            }
        }
        table
    }

    pub fn key_kind(&self) -> Option<DimensionKind> {
        self.key
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn rows(&self) -> &[MetricRecord] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<MetricRecord> {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == name)
    }

    /// Whether `name` was produced by an available source.
    pub fn has_field(&self, name: &str) -> bool {
        self.available.contains(name)
    }

    /// Available fields in schema order.
    pub fn available_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .copied()
            .filter(|f| self.available.contains(f))
    }

    /// Append a record; the value count must match the schema.
    pub fn push(
        &mut self,
        year: Year,
        dimension: Option<Dimension>,
        values: Vec<Value>,
    ) -> PulseResult<()> {
        if values.len() != self.fields.len() {
            return Err(PulseError::schema(format!(
                "row for {year} has {} values, schema has {}",
                values.len(),
                self.fields.len()
            )));
        }
        if dimension.map(|d| d.kind()) != self.key {
            return Err(PulseError::schema(format!(
                "row for {year} has key {:?}, table expects {:?}",
                dimension.map(|d| d.kind()),
                self.key
            )));
        }
        self.rows.push(MetricRecord {
            year,
            dimension,
            values,
        });
        Ok(())
    }

    /// Append a column. Existing rows receive `Unavailable`.
    pub fn add_field(&mut self, name: &'static str, available: bool) -> usize {
        let idx = match self.field_index(name) {
            Some(idx) => idx,
            None => {
                self.fields.push(name);
                for row in &mut self.rows {
                    row.values.push(Value::Unavailable);
                }
                self.fields.len() - 1
            }
        };
        if available {
            self.available.insert(name);
        }
        idx
    }

    pub fn mark_unavailable(&mut self, name: &str) {
        self.available.remove(name);
    }

    /// Cell lookup by row position and column name.
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.field_index(name)?;
        self.rows.get(row).and_then(|r| r.values.get(idx))
    }

    /// Numeric view of one column in row order. `None` if not in the schema.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.field_index(name)?;
        Some(self.rows.iter().map(|r| r.values[idx].as_f64()).collect())
    }

    /// Label view of one column in row order.
    pub fn labels(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.field_index(name)?;
        Some(self.rows.iter().map(|r| r.values[idx].as_label()).collect())
    }

    /// Rows belonging to one dimension key, order preserved.
    pub fn filter_dimension(&self, dimension: Dimension) -> DataTable {
        DataTable {
            key: self.key,
            fields: self.fields.clone(),
            available: self.available.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r.dimension == Some(dimension))
                .cloned()
                .collect(),
        }
    }

    /// Total of a column per year, most recent year first. Years with no
    /// present value are skipped.
    pub fn sum_by_year(&self, name: &str) -> Vec<(Year, f64)> {
        let Some(idx) = self.field_index(name) else {
            return Vec::new();
        };
        let mut totals: BTreeMap<Year, f64> = BTreeMap::new();
        for row in &self.rows {
            if let Some(v) = row.values[idx].as_f64() {
                *totals.entry(row.year).or_default() += v;
            }
        }
        totals.into_iter().rev().collect()
    }

    /// Reject duplicate `(year, dimension)` keys.
    pub fn ensure_unique_keys(&self) -> PulseResult<()> {
        let mut seen = BTreeSet::new();
        for row in &self.rows {
            if !seen.insert(row.key()) {
                return Err(PulseError::schema(format!(
                    "duplicate key ({}, {})",
                    row.year,
                    row.dimension.map_or("-", |d| d.as_str())
                )));
            }
        }
        Ok(())
    }

    /// Reorder columns to `fields`, adding missing ones as unavailable.
    /// A column outside `fields` is a schema error.
    pub fn conform(self, fields: &[&'static str]) -> PulseResult<DataTable> {
        if let Some(extra) = self.fields.iter().find(|f| !fields.contains(f)) {
            return Err(PulseError::schema(format!("unexpected column `{extra}`")));
        }
        let mapping: Vec<Option<usize>> = fields.iter().map(|f| self.field_index(f)).collect();
        let available = self
            .available
            .iter()
            .copied()
            .filter(|f| fields.contains(f))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                let values = mapping
                    .iter()
                    .map(|m| match m {
                        Some(i) => std::mem::replace(&mut row.values[*i], Value::Unavailable),
                        None => Value::Unavailable,
                    })
                    .collect();
                MetricRecord {
                    year: row.year,
                    dimension: row.dimension,
                    values,
                }
            })
            .collect();
        Ok(DataTable {
            key: self.key,
            fields: fields.to_vec(),
            available,
            rows,
        })
    }

    pub fn to_json(&self) -> PulseResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

struct RowView<'a> {
    table: &'a DataTable,
    row: &'a MetricRecord,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("year", &self.row.year)?;
        if let (Some(kind), Some(dimension)) = (self.table.key, self.row.dimension) {
            map.serialize_entry(kind.column_name(), dimension.as_str())?;
        }
        for (name, value) in self.table.fields.iter().zip(&self.row.values) {
            if self.table.available.contains(name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

/// Rows serialize as an array of objects; unavailable columns are omitted.
impl Serialize for DataTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView { table: self, row })?;
        }
        seq.end()
    }
}
