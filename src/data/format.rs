use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse interval strings like "5m", "30s", "1.5h", "250ms"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {}", s);
            }
            return Ok(Duration::from_millis((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Format an average response time given in milliseconds.
pub fn format_response_time(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{}ms", ms.round() as i64)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

/// Normalize an upstream uptime string ("99.951%") to two decimals.
///
/// Unparseable input is returned unchanged.
pub fn format_uptime(uptime: &str) -> String {
    match uptime.trim().trim_end_matches('%').trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.2}%", value),
        _ => uptime.to_string(),
    }
}

/// Describe how long ago `then` was, relative to `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - then).num_milliseconds();
    let mins = diff_ms.div_euclid(60_000);
    let hours = diff_ms.div_euclid(3_600_000);
    let days = diff_ms.div_euclid(86_400_000);

    if mins < 1 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{} minute{} ago", mins, plural(mins))
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural(hours))
    } else {
        format!("{} day{} ago", days, plural(days))
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Short date, e.g. "Oct 18".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Long date, e.g. "October 18, 2026".
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
