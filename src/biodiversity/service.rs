//! Biodiversity table assembly.

use crate::common::error::{PulseError, PulseResult};
use crate::series::GenContext;
use crate::table::domain::{DataTable, Domain};
use crate::table::merge;
use crate::table::pipeline::{self, attempt};

use super::domain::{BiodiversitySources, SCHEMA};
use super::fallback;

pub fn get_biodiversity_data(ctx: &mut GenContext, limit: Option<usize>) -> DataTable {
    get_biodiversity_data_with(&BiodiversitySources::default(), ctx, limit)
}

pub fn get_biodiversity_data_with(
    sources: &BiodiversitySources,
    ctx: &mut GenContext,
    limit: Option<usize>,
) -> DataTable {
    pipeline::resolve(&SCHEMA, ctx, limit, |ctx| build(sources, ctx), fallback::synthesize)
}

/// Region-keyed sources are outer-joined; species data is broadcast by year.
fn build(sources: &BiodiversitySources, ctx: &mut GenContext) -> PulseResult<DataTable> {
    let endangered = attempt(Domain::Biodiversity, sources.endangered.as_ref(), ctx);
    let habitat = attempt(Domain::Biodiversity, sources.habitat.as_ref(), ctx);
    let mut table = match (endangered, habitat) {
        (Some(endangered), Some(habitat)) => merge::outer_join(endangered, habitat)?,
        (Some(table), None) | (None, Some(table)) => table,
        (None, None) => return Err(PulseError::NoSources(Domain::Biodiversity)),
    };
    if let Some(species) = attempt(Domain::Biodiversity, sources.species.as_ref(), ctx) {
        table = merge::left_join_on_year(table, &species)?;
    }
    merge::forward_fill(&mut table);
    Ok(table)
}
