//! Error handling primitives shared across the pipeline.
//!
//! Errors never reach the dashboard caller: `get_<domain>_data` swaps in the
//! fallback table instead. They still carry enough context to be logged.

use thiserror::Error;

use crate::table::domain::Domain;

/// Stable error codes that cross the FFI boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PulseCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// A single upstream source could not be produced.
    SourceUnavailable = 1,
    /// No source of a domain produced rows.
    NoSources = 2,
    /// Input failed validation.
    InvalidInput = 3,
    /// Tables could not be combined.
    Schema = 4,
    /// Configuration value could not be parsed.
    Config = 5,
    /// Catch-all for bugs and unexpected paths.
    Internal = 6,
}

/// Canonical error type for the crate.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PulseError {
    /// An individual source failed; recovered by the merge stage.
    #[error("source `{source_name}` unavailable: {reason}")]
    SourceUnavailable {
        source_name: &'static str,
        reason: String,
    },
    /// Every source of the domain failed.
    #[error("no source produced data for {0}")]
    NoSources(Domain),
    /// The merged table ended up without rows.
    #[error("pipeline for {0} produced no rows")]
    EmptyTable(Domain),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias used throughout the crate.
pub type PulseResult<T> = Result<T, PulseError>;

impl PulseError {
    /// Validation helper.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Schema helper.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Wrap any failure of a named source.
    pub fn unavailable(source_name: &'static str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name,
            reason: reason.to_string(),
        }
    }

    /// Machine parsable code for this error.
    pub fn code(&self) -> PulseCode {
        match self {
            Self::SourceUnavailable { .. } => PulseCode::SourceUnavailable,
            Self::NoSources(_) | Self::EmptyTable(_) => PulseCode::NoSources,
            Self::InvalidInput(_) => PulseCode::InvalidInput,
            Self::Schema(_) => PulseCode::Schema,
            Self::Config(_) => PulseCode::Config,
            Self::Serialization(_) => PulseCode::Internal,
        }
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
