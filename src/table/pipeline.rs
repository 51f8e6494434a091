//! Primary-then-fallback resolution shared by every domain.
//!
//! Sources return `PulseResult`; a failed source is logged and dropped, and a
//! failed domain pipeline is replaced wholesale by its fallback table.

use tracing::{error, info, warn};

use crate::common::error::{PulseError, PulseResult};
use crate::common::time;
use crate::series::GenContext;

use super::domain::{DataTable, Domain, DomainSchema};
use super::merge;

/// Producer of one partial table.
pub trait TableSource {
    fn name(&self) -> &'static str;
    fn produce(&self, ctx: &mut GenContext) -> PulseResult<DataTable>;
}

/// Source that is switched off; always reports itself unavailable.
pub struct DisabledSource {
    name: &'static str,
}

impl DisabledSource {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl TableSource for DisabledSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn produce(&self, _ctx: &mut GenContext) -> PulseResult<DataTable> {
        Err(PulseError::unavailable(self.name, "source disabled"))
    }
}

/// Run one source; failures and empty tables become `None`.
pub fn attempt(
    domain: Domain,
    source: &dyn TableSource,
    ctx: &mut GenContext,
) -> Option<DataTable> {
    match source.produce(ctx) {
        Ok(table) if !table.is_empty() => Some(table),
        Ok(_) => {
            warn!(domain = %domain, source = source.name(), "source produced no rows");
            None
        }
        Err(err) => {
            warn!(domain = %domain, source = source.name(), error = %err, "source unavailable");
            None
        }
    }
}

/// Settle on a table for `schema.domain`, then sort and truncate it.
///
/// `primary` runs first; an error or an empty result switches to `fallback`.
/// Should the fallback itself fail, an all-unavailable skeleton keeps the
/// result well-formed.
pub fn resolve<P, F>(
    schema: &DomainSchema,
    ctx: &mut GenContext,
    limit: Option<usize>,
    primary: P,
    fallback: F,
) -> DataTable
where
    P: FnOnce(&mut GenContext) -> PulseResult<DataTable>,
    F: FnOnce(&mut GenContext) -> PulseResult<DataTable>,
{
    let domain = schema.domain;
    let start = time::now_ms();
    let primary = primary(&mut *ctx).and_then(|table| {
        if table.is_empty() {
            Err(PulseError::EmptyTable(domain))
        } else {
            table.conform(schema.fields)
        }
    });

    let (mut table, used_fallback) = match primary {
        Ok(table) => (table, false),
        Err(err) => {
            warn!(domain = %domain, error = %err, "primary pipeline failed, using fallback table");
            let table = fallback(&mut *ctx)
                .and_then(|t| t.conform(schema.fields))
                .unwrap_or_else(|err| {
                    error!(domain = %domain, error = %err, "fallback synthesis failed");
                    DataTable::skeleton(schema, ctx.years_from(schema.first_year))
                });
            (table, true)
        }
    };

    merge::sort_rows(&mut table);
    merge::truncate(&mut table, limit);
    info!(
        domain = %domain,
        rows = table.len(),
        fallback = used_fallback,
        dur_ms = time::now_ms().saturating_sub(start) as u64,
        "table built"
    );
    table
}
