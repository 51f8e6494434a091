//! Ecosystem table assembly.

use crate::common::error::{PulseError, PulseResult};
use crate::series::GenContext;
use crate::table::domain::{DataTable, Domain};
use crate::table::merge;
use crate::table::pipeline::{self, attempt};

use super::domain::{EcosystemSources, SCHEMA};
use super::fallback;

pub fn get_ecosystem_data(ctx: &mut GenContext, limit: Option<usize>) -> DataTable {
    get_ecosystem_data_with(&EcosystemSources::default(), ctx, limit)
}

pub fn get_ecosystem_data_with(
    sources: &EcosystemSources,
    ctx: &mut GenContext,
    limit: Option<usize>,
) -> DataTable {
    pipeline::resolve(&SCHEMA, ctx, limit, |ctx| build(sources, ctx), fallback::synthesize)
}

/// Stack the per-type tables into one long table. Shared columns (area,
/// change, health) coalesce; type-specific columns stay empty on other rows.
fn build(sources: &EcosystemSources, ctx: &mut GenContext) -> PulseResult<DataTable> {
    let mut table = attempt(Domain::Ecosystem, sources.forest.as_ref(), ctx)
        .ok_or(PulseError::NoSources(Domain::Ecosystem))?;
    for source in [&sources.coral, &sources.wetland, &sources.soil] {
        if let Some(part) = attempt(Domain::Ecosystem, source.as_ref(), ctx) {
            table = merge::outer_join(table, part)?;
        }
    }
    Ok(table)
}
