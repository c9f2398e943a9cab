//! Reusable formatting utilities for CLI output
//!
//! Timestamps, money and durations as they appear across commands.

use chrono::{DateTime, Local, Utc};

/// Format an RFC 3339 timestamp as local date/time.
///
/// Returns "N/A" for empty or unparseable input.
///
/// # Example output
/// `15/01/2025 19:00 WIB`
pub fn format_timestamp_local(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => format_datetime_local(dt.with_timezone(&Utc)),
        Err(_) => "N/A".to_string(),
    }
}

/// Format a UTC instant in the local timezone
pub fn format_datetime_local(dt: DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    format!(
        "{} {}",
        local.format("%d/%m/%Y %H:%M"),
        offset_to_tz_abbrev(local.offset().local_minus_utc())
    )
}

/// Convert a UTC offset (seconds) to a timezone abbreviation.
///
/// Indonesian zones get their local names; anything else falls back to
/// `UTC+N`.
pub fn offset_to_tz_abbrev(offset_secs: i32) -> String {
    let offset_hours = offset_secs / 3600;
    match offset_hours {
        0 => "UTC".to_string(),
        7 => "WIB".to_string(),
        8 => "WITA".to_string(),
        9 => "WIT".to_string(),
        _ => format!("UTC{:+}", offset_hours),
    }
}

/// Format an amount in Indonesian Rupiah, e.g. `Rp 1.250.000`.
///
/// Fractions are rounded to whole rupiah.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Format a duration in minutes, e.g. `1h 30m`
pub fn format_minutes(minutes: u32) -> String {
    if minutes == 0 {
        return "N/A".to_string();
    }
    let (hours, mins) = (minutes / 60, minutes % 60);
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Format a ratio or percentage value as `NN.N%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
