//! Runtime configuration loaded from the environment.
//!
//! Environment variables:
//! - `PULSE_SEED`: seed for the session RNG (random when unset)
//! - `PULSE_CURRENT_YEAR`: pin the last generated year (clock year when unset)
//! - `PULSE_LOG_LEVEL`: 0 = error .. 4 = trace (default 1)
//!
//! TODO: Report a `PULSE_CURRENT_YEAR` outside the generation window instead
//! of letting `GenContext` clamp it silently.

use std::env;

use crate::common::error::{PulseError, PulseResult};

/// Warnings and errors only.
pub const DEFAULT_LOG_LEVEL: u8 = 1;

/// Snapshot of configuration values consumed by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppCfg {
    pub seed: Option<u64>,
    pub current_year: Option<i32>,
    pub log_level: u8,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            seed: None,
            current_year: None,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> PulseResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> PulseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            seed: parse_opt(&lookup, "PULSE_SEED")?,
            current_year: parse_opt(&lookup, "PULSE_CURRENT_YEAR")?,
            log_level: parse_opt(&lookup, "PULSE_LOG_LEVEL")?.unwrap_or(DEFAULT_LOG_LEVEL),
        })
    }
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> PulseResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PulseError::Config(format!("{key}: cannot parse `{raw}`"))),
    }
}
