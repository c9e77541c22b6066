//! Overall status aggregation.

use serde::Serialize;

use crate::source::{ServiceState, ServiceStatus};

/// Status of the whole system, derived from every service on each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Up,
    Degraded,
    Down,
    Unknown,
}

impl OverallStatus {
    /// Banner text for this status.
    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Up => "All Systems Operational",
            OverallStatus::Degraded => "Some Systems Degraded",
            OverallStatus::Down => "System Outage",
            OverallStatus::Unknown => "Status Unknown",
        }
    }
}

/// Anything that carries a service state.
pub trait HasStatus {
    fn state(&self) -> ServiceState;
}

impl HasStatus for ServiceState {
    fn state(&self) -> ServiceState {
        *self
    }
}

impl HasStatus for ServiceStatus {
    fn state(&self) -> ServiceState {
        self.status
    }
}

impl<T: HasStatus + ?Sized> HasStatus for &T {
    fn state(&self) -> ServiceState {
        (**self).state()
    }
}

/// Fold service states into one: down beats degraded beats up; nothing at all
/// is unknown.
pub fn overall_status<I>(items: I) -> OverallStatus
where
    I: IntoIterator,
    I::Item: HasStatus,
{
    let mut any = false;
    let mut degraded = false;

    for item in items {
        any = true;
        match item.state() {
            ServiceState::Down => return OverallStatus::Down,
            ServiceState::Degraded => degraded = true,
            ServiceState::Up => {}
        }
    }

    if !any {
        OverallStatus::Unknown
    } else if degraded {
        OverallStatus::Degraded
    } else {
        OverallStatus::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures::service;
    use ServiceState::*;

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(overall_status(Vec::<ServiceState>::new()), OverallStatus::Unknown);
    }

    #[test]
    fn test_priority() {
        assert_eq!(overall_status([Up, Up]), OverallStatus::Up);
        assert_eq!(overall_status([Up, Degraded]), OverallStatus::Degraded);
        assert_eq!(overall_status([Up, Degraded, Down]), OverallStatus::Down);
        assert_eq!(overall_status([Down, Degraded]), OverallStatus::Down);
    }

    #[test]
    fn test_over_services() {
        let services = vec![
            service("a", Up),
            service("b", Up),
            service("c", Degraded),
        ];
        assert_eq!(overall_status(&services), OverallStatus::Degraded);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OverallStatus::Up.label(), "All Systems Operational");
        assert_eq!(OverallStatus::Unknown.label(), "Status Unknown");
    }
}
