//! Wire types for the two upstream JSON resources.
//!
//! `ServiceStatus` matches the `history/summary.json` file written by
//! Upptime; `Incident` matches the GitHub issues API. Both are read-only
//! snapshots: every refresh cycle replaces them wholesale.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Date format used for `dailyMinutesDown` keys.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Current state of a single monitored endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Up,
    Down,
    Degraded,
}

impl ServiceState {
    /// Short label shown on service cards.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::Up => "Operational",
            ServiceState::Degraded => "Degraded",
            ServiceState::Down => "Down",
        }
    }
}

/// Aggregation window for uptime and response time figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    AllTime,
    Day,
    Week,
    Month,
    Year,
}

impl Window {
    pub const ALL: [Window; 5] = [
        Window::AllTime,
        Window::Day,
        Window::Week,
        Window::Month,
        Window::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Window::AllTime => "All time",
            Window::Day => "24 hours",
            Window::Week => "7 days",
            Window::Month => "30 days",
            Window::Year => "1 year",
        }
    }
}

/// One monitored endpoint as reported by the summary resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub slug: String,
    pub status: ServiceState,

    /// Uptime percentages, already formatted upstream (e.g. "99.95%").
    pub uptime: String,
    pub uptime_day: String,
    pub uptime_week: String,
    pub uptime_month: String,
    pub uptime_year: String,

    /// Average response times in milliseconds.
    pub time: f64,
    pub time_day: f64,
    pub time_week: f64,
    pub time_month: f64,
    pub time_year: f64,

    /// Minutes of downtime per `YYYY-MM-DD` day. Only days with at least one
    /// completed check are present.
    #[serde(default)]
    pub daily_minutes_down: BTreeMap<String, f64>,
}

impl ServiceStatus {
    /// Formatted uptime string for a window.
    pub fn uptime_for(&self, window: Window) -> &str {
        match window {
            Window::AllTime => &self.uptime,
            Window::Day => &self.uptime_day,
            Window::Week => &self.uptime_week,
            Window::Month => &self.uptime_month,
            Window::Year => &self.uptime_year,
        }
    }

    /// Average response time (ms) for a window.
    pub fn response_time_for(&self, window: Window) -> f64 {
        match window {
            Window::AllTime => self.time,
            Window::Day => self.time_day,
            Window::Week => self.time_week,
            Window::Month => self.time_month,
            Window::Year => self.time_year,
        }
    }
}

/// Lifecycle state of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentState {
    Open,
    Closed,
}

/// A label attached to an incident, used for severity classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// A reported incident (a GitHub issue carrying the status label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: u64,
    pub title: String,
    /// GitHub returns `null` for issues without a description.
    #[serde(default)]
    pub body: Option<String>,
    pub state: IncidentState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub html_url: String,
}

impl Incident {
    pub fn is_resolved(&self) -> bool {
        self.state == IncidentState::Closed
    }
}

/// The result of one successful refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub services: Vec<ServiceStatus>,
    pub incidents: Vec<Incident>,
    pub fetched_at: DateTime<Utc>,
}

impl StatusSnapshot {
    pub fn new(services: Vec<ServiceStatus>, incidents: Vec<Incident>) -> Self {
        Self {
            services,
            incidents,
            fetched_at: Utc::now(),
        }
    }
}

/// What a data source hands back after a refresh cycle settles.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The essential fetch succeeded; incidents may be empty.
    Ready(StatusSnapshot),
    /// The essential fetch failed. The message is user-facing.
    Failed(String),
}

/// Check the summary payload before it is accepted for display.
pub fn validate_services(services: &[ServiceStatus]) -> Result<(), FetchError> {
    let mut seen = HashSet::new();

    for service in services {
        if service.slug.trim().is_empty() {
            return Err(FetchError::Invalid(format!(
                "service '{}' has an empty slug",
                service.name
            )));
        }
        if !seen.insert(service.slug.as_str()) {
            return Err(FetchError::Invalid(format!(
                "duplicate slug '{}'",
                service.slug
            )));
        }
        for (day, minutes) in &service.daily_minutes_down {
            if NaiveDate::parse_from_str(day, DAY_FORMAT).is_err() {
                return Err(FetchError::Invalid(format!(
                    "service '{}' has malformed day key '{}'",
                    service.slug, day
                )));
            }
            if !minutes.is_finite() {
                return Err(FetchError::Invalid(format!(
                    "service '{}' has non-numeric downtime on {}",
                    service.slug, day
                )));
            }
        }
    }

    Ok(())
}
