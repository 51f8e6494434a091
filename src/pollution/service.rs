//! Pollution table assembly.

use crate::common::error::{PulseError, PulseResult};
use crate::series::GenContext;
use crate::table::domain::{DataTable, Domain};
use crate::table::merge;
use crate::table::pipeline::{self, attempt};

use super::domain::{PollutionSources, CATEGORY_RULES, POLLUTANT_CATEGORY, SCHEMA};
use super::fallback;

pub fn get_pollution_data(ctx: &mut GenContext, limit: Option<usize>) -> DataTable {
    get_pollution_data_with(&PollutionSources::default(), ctx, limit)
}

pub fn get_pollution_data_with(
    sources: &PollutionSources,
    ctx: &mut GenContext,
    limit: Option<usize>,
) -> DataTable {
    pipeline::resolve(&SCHEMA, ctx, limit, |ctx| build(sources, ctx), fallback::synthesize)
}

fn build(sources: &PollutionSources, ctx: &mut GenContext) -> PulseResult<DataTable> {
    let mut tables = [&sources.gases, &sources.air, &sources.plastics]
        .into_iter()
        .filter_map(|source| attempt(Domain::Pollution, source.as_ref(), ctx));
    let mut table = tables.next().ok_or(PulseError::NoSources(Domain::Pollution))?;
    for aux in tables {
        table = merge::left_join_on_year(table, &aux)?;
    }
    merge::forward_fill(&mut table);
    merge::categorize(&mut table, POLLUTANT_CATEGORY, CATEGORY_RULES);
    Ok(table)
}
