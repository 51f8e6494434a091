use serde::Serialize;

use crate::biodiversity::domain::ENDANGERED_COUNT;
use crate::climate::domain::TEMPERATURE_ANOMALY;
use crate::common::error::PulseResult;
use crate::common::format::{format_number, trend_indicator, TrendIndicator};
use crate::ecosystem::domain::FOREST_COVERAGE;
use crate::pollution::domain::CO2_LEVEL;
use crate::session::Session;
use crate::table::domain::{DataTable, EcosystemType, Year};

/// One headline metric.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VitalSign {
    pub name: &'static str,
    pub unit: &'static str,
    pub year: Year,
    pub value: f64,
    pub display: String,
    pub previous: Option<f64>,
    pub trend: Option<TrendIndicator>,
}

impl VitalSign {
    fn new(
        name: &'static str,
        unit: &'static str,
        higher_is_better: bool,
        latest: (Year, f64),
        previous: Option<f64>,
    ) -> Self {
        let (year, value) = latest;
        Self {
            name,
            unit,
            year,
            value,
            display: format_number(Some(value), 2),
            previous,
            trend: trend_indicator(Some(value), previous, higher_is_better),
        }
    }
}

/// First two present values of `field`, most recent first.
fn latest_two(table: &DataTable, field: &str) -> Option<((Year, f64), Option<f64>)> {
    if !table.has_field(field) {
        return None;
    }
    let column = table.column(field)?;
    let mut present = table
        .rows()
        .iter()
        .zip(column)
        .filter_map(|(row, v)| v.map(|v| (row.year, v)));
    let latest = present.next()?;
    Some((latest, present.next().map(|(_, v)| v)))
}

/// Temperature, CO2, forest coverage and global endangered species.
/// Metrics whose column is unavailable are left out.
pub fn vital_signs(session: &Session) -> Vec<VitalSign> {
    let mut signs = Vec::with_capacity(4);

    if let Some((latest, prev)) = latest_two(&session.climate(Some(2)), TEMPERATURE_ANOMALY) {
        signs.push(VitalSign::new("Global temperature anomaly", "°C", false, latest, prev));
    }
    if let Some((latest, prev)) = latest_two(&session.pollution(Some(2)), CO2_LEVEL) {
        signs.push(VitalSign::new("Atmospheric CO2", "ppm", false, latest, prev));
    }
    let forests = session
        .ecosystem(Some(8))
        .filter_dimension(EcosystemType::Forests.into());
    if let Some((latest, prev)) = latest_two(&forests, FOREST_COVERAGE) {
        signs.push(VitalSign::new("Forest coverage", "%", true, latest, prev));
    }
    let biodiversity = session.biodiversity(Some(12));
    if biodiversity.has_field(ENDANGERED_COUNT) {
        let totals = biodiversity.sum_by_year(ENDANGERED_COUNT);
        if let Some(&latest) = totals.first() {
            let prev = totals.get(1).map(|&(_, v)| v);
            signs.push(VitalSign::new("Endangered species", "species", false, latest, prev));
        }
    }
    signs
}

/// Vital signs as a JSON array.
pub fn vital_signs_json(session: &Session) -> PulseResult<String> {
    Ok(serde_json::to_string(&vital_signs(session))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_signs_for_a_healthy_session() {
        let session = Session::new(1).with_current_year(2024);
        let signs = vital_signs(&session);
        assert_eq!(signs.len(), 4);
        assert!(signs.iter().all(|s| s.year == 2024));
        assert!(signs.iter().all(|s| s.previous.is_some() && s.trend.is_some()));
        let co2 = &signs[1];
        assert_eq!(co2.unit, "ppm");
        assert!(co2.value > 400.0);
    }

    #[test]
    fn latest_two_skips_missing_values() {
        use crate::table::domain::Value;
        let mut table = DataTable::new(None, &["x"]);
        table.push(2024, None, vec![Value::Unavailable]).unwrap();
        table.push(2023, None, vec![Value::Present(2.0)]).unwrap();
        table.push(2022, None, vec![Value::Present(1.0)]).unwrap();
        assert_eq!(latest_two(&table, "x"), Some(((2023, 2.0), Some(1.0))));
        assert_eq!(latest_two(&table, "y"), None);
    }

    #[test]
    fn serializes_as_array() {
        let session = Session::new(1).with_current_year(2024);
        let json = vital_signs_json(&session).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(4));
    }
}
