//! Daily uptime reconstruction.
//!
//! Upstream only records days on which at least one check completed, and only
//! stores the minutes of downtime for each. This module expands that sparse
//! record into a dense, oldest-first series of calendar days, keeping "no data
//! yet" distinct from "no downtime recorded".

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::source::DAY_FORMAT;

/// Default number of trailing days shown in uptime bars.
pub const DEFAULT_WINDOW_DAYS: usize = 90;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Uptime for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyUptime {
    pub date: NaiveDate,
    /// Percentage in `[0, 100]`, or `None` when the day precedes monitoring.
    pub uptime: Option<f64>,
}

impl DailyUptime {
    pub fn level(&self) -> UptimeLevel {
        UptimeLevel::classify(self.uptime)
    }
}

/// Bucket used to colour an uptime bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UptimeLevel {
    NoData,
    Up,
    Degraded,
    Down,
}

impl UptimeLevel {
    pub fn classify(uptime: Option<f64>) -> Self {
        match uptime {
            None => UptimeLevel::NoData,
            Some(u) if u >= 99.9 => UptimeLevel::Up,
            Some(u) if u >= 95.0 => UptimeLevel::Degraded,
            Some(_) => UptimeLevel::Down,
        }
    }
}

/// Build `days` entries ending at (and including) `today`, oldest first.
///
/// A recorded day scores `(1440 - minutes) / 1440 * 100`, clamped to
/// `[0, 100]`. An unrecorded day scores 100 if it falls on or after the
/// earliest recorded day, and `None` if it falls before it. With no records
/// at all, `service_start` (or `today` when absent) stands in for the
/// earliest record.
///
/// Keys that are not valid `YYYY-MM-DD` dates are ignored.
pub fn daily_uptime(
    minutes_down: &BTreeMap<String, f64>,
    days: usize,
    service_start: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<DailyUptime> {
    let recorded: BTreeMap<NaiveDate, f64> = minutes_down
        .iter()
        .filter_map(|(key, minutes)| {
            NaiveDate::parse_from_str(key, DAY_FORMAT)
                .ok()
                .map(|date| (date, *minutes))
        })
        .collect();

    let earliest = recorded
        .keys()
        .next()
        .copied()
        .or(service_start)
        .unwrap_or(today);

    let mut result = Vec::with_capacity(days);
    let mut date = today;
    for offset in 0..days {
        if offset > 0 {
            match date.pred_opt() {
                Some(prev) => date = prev,
                None => break,
            }
        }

        let uptime = match recorded.get(&date) {
            Some(minutes) => Some(uptime_percent(*minutes)),
            None if date < earliest => None,
            None => Some(100.0),
        };
        result.push(DailyUptime { date, uptime });
    }

    result.reverse();
    result
}

/// Same as [`daily_uptime`], with today's date taken from the local clock.
///
/// The clock is read once, so every entry in a single call agrees on "today".
pub fn daily_uptime_until_now(
    minutes_down: &BTreeMap<String, f64>,
    days: usize,
    service_start: Option<NaiveDate>,
) -> Vec<DailyUptime> {
    daily_uptime(minutes_down, days, service_start, Local::now().date_naive())
}

fn uptime_percent(minutes_down: f64) -> f64 {
    ((MINUTES_PER_DAY - minutes_down) / MINUTES_PER_DAY * 100.0).clamp(0.0, 100.0)
}
