//! Number formatting for the report

use std::time::Duration;

/// Round `value` to `digits` decimal places.
///
/// Rounds the exact decimal expansion of `value` (ties to even), not a scaled
/// copy of it, so boundary values such as `1.5e-10` land where a decimal
/// reading of the number says they should.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let precision = usize::try_from(digits).unwrap_or(0);
    format!("{:.*}", precision, value).parse().unwrap_or(value)
}

/// Format a float the way the report expects: whole numbers keep one
/// decimal (`100.0`), everything else uses the shortest exact form (`66.67`).
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// `part / whole` as a percentage rounded to two decimals
pub fn format_percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return format_float(0.0);
    }
    format_float(round_to(part as f64 / whole as f64 * 100.0, 2))
}

/// Seconds of `duration` rounded to `digits` decimals
pub fn format_seconds(duration: Duration, digits: i32) -> String {
    format_float(round_to(duration.as_secs_f64(), digits))
}
