//! Long-format tables and the merge/normalize pipeline.

pub mod domain;
pub mod merge;
pub mod pipeline;

pub use domain::{
    DataTable, Dimension, DimensionKind, Domain, DomainSchema, EcosystemType, MetricRecord,
    Region, Value, Year, YearRange,
};
pub use pipeline::{DisabledSource, TableSource};
