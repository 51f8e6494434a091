//! C-compatible API consumed by the dashboard shell.
//!
//! Every string returned here is owned by Rust and must be released with
//! [`pulse_free_str`]. No entry point returns null.
//!
//! TODO: Export the `common::format` helpers so the shell stops duplicating
//! number formatting and trend colours.

use std::ffi::CString;
use std::os::raw::c_char;

use tracing::error;

use crate::common::config::AppCfg;
use crate::common::error::PulseResult;
use crate::common::log;
use crate::session::Session;
use crate::table::domain::Domain;
use crate::vitals;

const FAILURE_JSON: &str = r#"{"ok":false}"#;

/// Passed to [`pulse_init_logging`] to read the level from `PULSE_LOG_LEVEL`.
pub const LOG_LEVEL_FROM_ENV: u8 = u8::MAX;

/// ABI version to coordinate with the UI layer.
#[no_mangle]
pub extern "C" fn pulse_api_version() -> u32 {
    1
}

/// Install the JSON log subscriber. See `common::log::level_from` for levels;
/// [`LOG_LEVEL_FROM_ENV`] defers to the environment.
#[no_mangle]
pub extern "C" fn pulse_init_logging(level: u8) {
    if level == LOG_LEVEL_FROM_ENV {
        log::init_from_env();
    } else {
        log::init(level);
    }
}

/// Table for one domain as a JSON array of rows. A negative `limit` returns
/// every row; an unknown domain code returns `{"ok":false}`.
#[no_mangle]
pub extern "C" fn pulse_domain_json(domain: u32, limit: i64, seed: u64) -> *const c_char {
    let Some(domain) = Domain::from_code(domain) else {
        return failure_raw();
    };
    let limit = usize::try_from(limit).ok();
    let table = session_for(seed).get(domain, limit);
    match table.to_json() {
        Ok(json) => string_to_raw(json),
        Err(err) => {
            error!(domain = %domain, error = %err, "table serialization failed");
            failure_raw()
        }
    }
}

/// Headline vital signs as a JSON array.
#[no_mangle]
pub extern "C" fn pulse_vitals_json(seed: u64) -> *const c_char {
    match vitals::vital_signs_json(&session_for(seed)) {
        Ok(json) => string_to_raw(json),
        Err(err) => {
            error!(error = %err, "vital signs serialization failed");
            failure_raw()
        }
    }
}

/// Free strings allocated by Rust.
///
/// # Safety
/// `ptr` must come from one of the functions above and be freed once.
#[no_mangle]
pub unsafe extern "C" fn pulse_free_str(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(CString::from_raw(ptr as *mut c_char));
}

/// Session for `seed`, honouring a pinned `PULSE_CURRENT_YEAR`.
fn session_for(seed: u64) -> Session {
    session_with(AppCfg::load(), seed)
}

/// The caller's seed always wins over `PULSE_SEED`.
fn session_with(cfg: PulseResult<AppCfg>, seed: u64) -> Session {
    let cfg = cfg.unwrap_or_else(|err| {
        error!(error = %err, "ignoring invalid configuration");
        AppCfg::default()
    });
    Session::from_cfg(&AppCfg {
        seed: Some(seed),
        ..cfg
    })
}

fn string_to_raw(s: String) -> *const c_char {
    match CString::new(s) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => failure_raw(),
    }
}

fn failure_raw() -> *const c_char {
    CString::new(FAILURE_JSON)
        .unwrap_or_default()
        .into_raw()
}
