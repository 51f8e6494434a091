//! Logging setup emitting JSON lines through `tracing`.
//!
//! TODO: Offer a plain-text formatter for interactive debugging.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::common::config::AppCfg;

/// Map the numeric config level onto a tracing level.
pub fn level_from(code: u8) -> Level {
    match code {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(code: u8) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_from(code))
        .with_target(true)
        .json()
        .finish();
    // Another subscriber may already be installed by the host process.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Install the subscriber at the level configured by `PULSE_LOG_LEVEL`.
/// An unreadable environment falls back to the default level.
pub fn init_from_env() {
    let cfg = AppCfg::load().unwrap_or_default();
    init(cfg.log_level);
}
