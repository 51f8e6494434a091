//! Display helpers shared with the dashboard layer.
//!
//! Missing values arrive as `None` or NaN and always render as a neutral
//! marker instead of an error.

use serde::Serialize;

/// Format a number with a K/M/B/T suffix.
pub fn format_number(value: Option<f64>, precision: usize) -> String {
    let Some(num) = value.filter(|v| !v.is_nan()) else {
        return "N/A".to_string();
    };
    let magnitude = num.abs();
    let (scaled, suffix) = if magnitude < 1e3 {
        (num, "")
    } else if magnitude < 1e6 {
        (num / 1e3, "K")
    } else if magnitude < 1e9 {
        (num / 1e6, "M")
    } else if magnitude < 1e12 {
        (num / 1e9, "B")
    } else {
        (num / 1e12, "T")
    };
    format!("{scaled:.precision$}{suffix}")
}

/// Round to `sig` significant figures.
pub fn round_to_significant(x: f64, sig: i32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let decimals = sig - x.abs().log10().floor() as i32 - 1;
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

/// Five-step arrow for a signed change.
pub fn trend_arrow(change: Option<f64>) -> &'static str {
    match change.filter(|c| !c.is_nan()) {
        None => "➡️",
        Some(c) if c > 1.0 => "⬆️",
        Some(c) if c > 0.0 => "↗️",
        Some(c) if c == 0.0 => "➡️",
        Some(c) if c > -1.0 => "↘️",
        Some(_) => "⬇️",
    }
}

/// Change between two consecutive observations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendIndicator {
    pub arrow: &'static str,
    pub change: f64,
    /// Relative change in percent; 0 when the previous value is 0.
    pub percent_change: f64,
    pub improving: bool,
}

pub fn trend_indicator(
    current: Option<f64>,
    previous: Option<f64>,
    higher_is_better: bool,
) -> Option<TrendIndicator> {
    let current = current.filter(|v| !v.is_nan())?;
    let previous = previous.filter(|v| !v.is_nan())?;
    let change = current - previous;
    let percent_change = if previous != 0.0 {
        change / previous.abs() * 100.0
    } else {
        0.0
    };
    let improving = if higher_is_better {
        change > 0.0
    } else {
        change < 0.0
    };
    Some(TrendIndicator {
        arrow: trend_arrow(Some(change)),
        change,
        percent_change,
        improving,
    })
}

/// Hex colour on a red-yellow-green scale; grey for missing values.
pub fn color_from_value(value: Option<f64>, min: f64, max: f64, reverse: bool) -> String {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return "#CCCCCC".to_string();
    };
    let span = max - min;
    let mut normalized = if span == 0.0 { 0.5 } else { (value - min) / span };
    normalized = normalized.clamp(0.0, 1.0);
    if reverse {
        normalized = 1.0 - normalized;
    }
    let (r, g) = if normalized < 0.5 {
        (255u8, (255.0 * normalized * 2.0) as u8)
    } else {
        ((255.0 * (1.0 - (normalized - 0.5) * 2.0)) as u8, 255u8)
    };
    format!("#{r:02x}{g:02x}00")
}
