//! Climate table assembly.

use crate::common::error::PulseResult;
use crate::series::GenContext;
use crate::table::domain::{DataTable, Domain};
use crate::table::merge;
use crate::table::pipeline::{self, attempt};

use super::domain::{ClimateSources, SCHEMA};
use super::fallback;

/// Climate table from the synthetic sources.
pub fn get_climate_data(ctx: &mut GenContext, limit: Option<usize>) -> DataTable {
    get_climate_data_with(&ClimateSources::default(), ctx, limit)
}

/// Climate table from caller-supplied sources.
pub fn get_climate_data_with(
    sources: &ClimateSources,
    ctx: &mut GenContext,
    limit: Option<usize>,
) -> DataTable {
    pipeline::resolve(&SCHEMA, ctx, limit, |ctx| build(sources, ctx), fallback::synthesize)
}

fn build(sources: &ClimateSources, ctx: &mut GenContext) -> PulseResult<DataTable> {
    let mut table = match attempt(Domain::Climate, sources.temperature.as_ref(), ctx) {
        Some(table) => table,
        None => fallback::temperature(ctx)?,
    };
    for aux in [&sources.sea_level, &sources.ice] {
        if let Some(aux) = attempt(Domain::Climate, aux.as_ref(), ctx) {
            table = merge::left_join_on_year(table, &aux)?;
        }
    }
    merge::forward_fill(&mut table);
    Ok(table)
}
