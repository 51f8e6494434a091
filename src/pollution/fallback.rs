//! Single-pass pollution table used when the primary pipeline fails.

use crate::common::error::PulseResult;
use crate::series::GenContext;
use crate::table::domain::{DataTable, Value};

use super::domain::{
    AIR_POLLUTANTS, FIELDS, GAS_START, MONITORING_START, SOIL_POLLUTANTS, WATER_POLLUTANTS,
};
use super::sources::{
    air_quality_index, chemical_index, co2_ppm, methane_ppb, microplastic, nitrous_oxide_ppb,
    ocean_plastic, ozone_ppb, pm25,
};

/// 1960 to the current year. Methane, nitrous oxide and every monitoring
/// series stay empty before 1990.
pub fn synthesize(ctx: &mut GenContext) -> PulseResult<DataTable> {
    let mut table = DataTable::new(None, FIELDS);
    for year in ctx.years_from(GAS_START).iter() {
        let rng = ctx.rng();
        let co2 = co2_ppm(rng, year);
        let ch4 = methane_ppb(rng, year);
        let n2o = nitrous_oxide_ppb(rng, year);

        let mut values: Vec<Value> = vec![co2.into()];
        if year >= MONITORING_START {
            let pm = pm25(rng, year);
            let o3 = ozone_ppb(rng, year);
            values.extend([
                ch4.into(),
                n2o.into(),
                pm.into(),
                o3.into(),
                air_quality_index(pm, o3).into(),
                ocean_plastic(rng, year).into(),
                microplastic(rng, year).into(),
                chemical_index(rng, year).into(),
                Value::Label(format!("{AIR_POLLUTANTS},{WATER_POLLUTANTS},{SOIL_POLLUTANTS}")),
            ]);
        } else {
            values.extend(std::iter::repeat(Value::Unavailable).take(8));
            values.push(Value::Label(AIR_POLLUTANTS.to_string()));
        }
        table.push(year, None, values)?;
    }
    Ok(table)
}
