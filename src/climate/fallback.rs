//! Hardcoded climate curves used when the primary pipeline fails.

use crate::common::error::PulseResult;
use crate::series::noise::gaussian;
use crate::series::GenContext;
use crate::table::domain::{DataTable, Value, YearRange};

use super::domain::{FALLBACK_YEARS, FIELDS, TEMPERATURE_ANOMALY};
use super::sources::sea_level_rise;

fn fallback_years(ctx: &GenContext) -> YearRange {
    ctx.years_from(ctx.current_year() - (FALLBACK_YEARS - 1))
}

fn anomaly(ctx: &mut GenContext, index: usize) -> f64 {
    let progress = index as f64 / f64::from(FALLBACK_YEARS - 1);
    -0.2 + 1.2 * progress.powf(0.7) + gaussian(ctx.rng(), 0.1)
}

/// Fifty years of accelerating warming. Also stands in for the temperature
/// source alone when only that source fails.
pub fn temperature(ctx: &mut GenContext) -> PulseResult<DataTable> {
    let mut table = DataTable::new(None, &[TEMPERATURE_ANOMALY]);
    for (i, year) in fallback_years(ctx).iter().enumerate() {
        let value = anomaly(ctx, i);
        table.push(year, None, vec![value.into()])?;
    }
    Ok(table)
}

/// Full climate table over the fallback window, every column populated.
pub fn synthesize(ctx: &mut GenContext) -> PulseResult<DataTable> {
    let mut table = DataTable::new(None, FIELDS);
    for (i, year) in fallback_years(ctx).iter().enumerate() {
        let temp = anomaly(ctx, i);
        let sea = (sea_level_rise(year) + gaussian(ctx.rng(), 2.0)).max(0.0);

        let since_1970 = f64::from(year - 1970);
        let arctic_decline = since_1970 * 0.04;
        let antarctic_decline = ((since_1970 - 30.0) * 0.02).max(0.0);
        let arctic = (16.0 - arctic_decline + gaussian(ctx.rng(), 0.3)).max(3.0);
        let antarctic = (20.0 - antarctic_decline + gaussian(ctx.rng(), 0.5)).max(5.0);

        let values: Vec<Value> = vec![
            temp.into(),
            sea.into(),
            arctic.into(),
            antarctic.into(),
            (arctic + antarctic).into(),
        ];
        table.push(year, None, values)?;
    }
    Ok(table)
}
