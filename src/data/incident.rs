//! Incident severity and recency.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::source::{Incident, Label};

/// Severity inferred from incident label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Down,
    Degraded,
    Unknown,
}

/// Classify by case-insensitive substring match on label names.
///
/// Any label containing "down" wins over any label containing "degraded".
/// This is lexical: a label such as "shutdown" also matches "down".
pub fn classify_labels(labels: &[Label]) -> Severity {
    let names: Vec<String> = labels.iter().map(|l| l.name.to_lowercase()).collect();

    if names.iter().any(|n| n.contains("down")) {
        Severity::Down
    } else if names.iter().any(|n| n.contains("degraded")) {
        Severity::Degraded
    } else {
        Severity::Unknown
    }
}

impl Incident {
    pub fn severity(&self) -> Severity {
        classify_labels(&self.labels)
    }
}

/// Whether `incident` was created at most `days` days before `now`.
pub fn is_recent(incident: &Incident, now: DateTime<Utc>, days: i64) -> bool {
    now - incident.created_at <= Duration::days(days)
}

/// Incidents created at most `days` days before `now`, in upstream order.
pub fn recent_incidents(incidents: &[Incident], now: DateTime<Utc>, days: i64) -> Vec<&Incident> {
    incidents.iter().filter(|i| is_recent(i, now, days)).collect()
}
