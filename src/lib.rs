//! Synthetic environmental indicator tables for the planetary dashboard.
//!
//! Four domains (climate, biodiversity, pollution, ecosystem) are produced
//! by per-source generators, merged into one long table per domain, and
//! replaced by a hardcoded fallback table whenever the merge fails.

pub mod api;
pub mod biodiversity;
pub mod climate;
pub mod common;
pub mod ecosystem;
pub mod pollution;
pub mod series;
pub mod session;
pub mod table;
pub mod vitals;

pub use biodiversity::get_biodiversity_data;
pub use climate::get_climate_data;
pub use common::{PulseCode, PulseError, PulseResult};
pub use ecosystem::get_ecosystem_data;
pub use pollution::get_pollution_data;
pub use series::GenContext;
pub use session::Session;
pub use table::{DataTable, Domain};
