//! Synthetic series generation: the compounding model, its noise helpers,
//! the per-key expander and the explicit generation context.

pub mod context;
pub mod expand;
pub mod generator;
pub mod noise;

pub use context::GenContext;
pub use expand::{expand, KeyedSeries};
pub use generator::{CompoundingSeries, SeriesPoint};
pub use noise::Bounds;
