//! Presentation-ready dashboard data.
//!
//! Turns a raw [`StatusSnapshot`] into per-service cards (with reconstructed
//! daily uptime) and severity-tagged incidents. The overall status is not
//! stored; it is folded from the current services whenever it is asked for.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use super::format::{format_response_time, format_uptime};
use super::incident::{is_recent, Severity};
use super::status::{overall_status, OverallStatus};
use super::uptime::{daily_uptime, DailyUptime, DEFAULT_WINDOW_DAYS};
use crate::source::{Incident, ServiceState, ServiceStatus, StatusSnapshot};

/// Incidents older than this many days are left off the timeline.
pub const INCIDENT_HORIZON_DAYS: i64 = 90;

/// Knobs for deriving the dashboard.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Number of trailing days in each uptime strip.
    pub window_days: usize,
    /// Fallback start of monitoring for services with no downtime records.
    pub monitoring_started: Option<NaiveDate>,
    /// Only incidents created within this many days are shown.
    pub incident_days: i64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            monitoring_started: None,
            incident_days: INCIDENT_HORIZON_DAYS,
        }
    }
}

/// A service with its derived uptime strip.
#[derive(Debug, Clone)]
pub struct ServiceCard {
    pub service: ServiceStatus,
    pub daily: Vec<DailyUptime>,
}

/// An incident with its derived severity.
#[derive(Debug, Clone)]
pub struct IncidentEntry {
    pub incident: Incident,
    pub severity: Severity,
}

/// Complete derived data ready for display.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub services: Vec<ServiceCard>,
    pub incidents: Vec<IncidentEntry>,
    pub fetched_at: DateTime<Utc>,
    /// Calendar day the uptime strips end on.
    pub today: NaiveDate,
    incident_days: i64,
}

impl DashboardData {
    /// Derive dashboard data from a snapshot, with uptime strips ending `today`.
    pub fn from_snapshot(
        snapshot: StatusSnapshot,
        options: &DisplayOptions,
        today: NaiveDate,
    ) -> Self {
        let services = snapshot
            .services
            .into_iter()
            .map(|service| {
                let daily = daily_uptime(
                    &service.daily_minutes_down,
                    options.window_days,
                    options.monitoring_started,
                    today,
                );
                ServiceCard { service, daily }
            })
            .collect();

        let incidents = snapshot
            .incidents
            .into_iter()
            .map(|incident| IncidentEntry {
                severity: incident.severity(),
                incident,
            })
            .collect();

        Self {
            services,
            incidents,
            fetched_at: snapshot.fetched_at,
            today,
            incident_days: options.incident_days,
        }
    }

    /// Aggregate status across all services.
    pub fn overall_status(&self) -> OverallStatus {
        overall_status(self.services.iter().map(|card| &card.service))
    }

    /// Number of services currently in `state`.
    pub fn count(&self, state: ServiceState) -> usize {
        self.services.iter().filter(|c| c.service.status == state).count()
    }

    /// Incidents inside the display horizon, relative to `now`.
    pub fn recent_incidents(&self, now: DateTime<Utc>) -> Vec<&IncidentEntry> {
        self.incidents
            .iter()
            .filter(|entry| is_recent(&entry.incident, now, self.incident_days))
            .collect()
    }

    /// Serialize the derived view for export.
    pub fn export_json(&self, now: DateTime<Utc>) -> Value {
        let services: Vec<Value> = self
            .services
            .iter()
            .map(|card| {
                let s = &card.service;
                json!({
                    "name": s.name,
                    "slug": s.slug,
                    "url": s.url,
                    "status": s.status,
                    "label": s.status.label(),
                    "uptime_month": format_uptime(&s.uptime_month),
                    "response_time": format_response_time(s.time),
                    "daily": card.daily,
                })
            })
            .collect();

        let incidents: Vec<Value> = self
            .recent_incidents(now)
            .iter()
            .map(|entry| {
                let i = &entry.incident;
                json!({
                    "id": i.id,
                    "title": i.title,
                    "state": i.state,
                    "severity": entry.severity,
                    "created_at": i.created_at,
                    "closed_at": i.closed_at,
                    "url": i.html_url,
                })
            })
            .collect();

        let overall = self.overall_status();
        json!({
            "overall": {
                "status": overall,
                "label": overall.label(),
                "up": self.count(ServiceState::Up),
                "degraded": self.count(ServiceState::Degraded),
                "down": self.count(ServiceState::Down),
            },
            "fetched_at": self.fetched_at,
            "services": services,
            "incidents": incidents,
        })
    }
}
