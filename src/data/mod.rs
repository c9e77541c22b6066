//! Derivations from raw status snapshots.
//!
//! Everything in here is pure: given the same snapshot and the same notion
//! of "today"/"now", it produces the same output.
//!
//! ## Submodules
//!
//! - [`uptime`]: Dense daily uptime series from sparse per-day downtime
//! - [`status`]: Overall status aggregation ([`OverallStatus`])
//! - [`incident`]: Incident severity from label names ([`Severity`])
//! - [`format`]: Response time, uptime, relative time and date formatting
//! - [`dashboard`]: Presentation-ready [`DashboardData`]
//!
//! ## Data Flow
//!
//! ```text
//! StatusSnapshot (services + incidents)
//!        │
//!        ▼
//! DashboardData::from_snapshot()
//!        │
//!        ├──▶ ServiceCard (daily_uptime() over the window)
//!        │
//!        ├──▶ IncidentEntry (classify_labels())
//!        │
//!        └──▶ overall_status() on demand
//! ```

pub mod dashboard;
pub mod format;
pub mod incident;
pub mod status;
pub mod uptime;

pub use dashboard::{DashboardData, DisplayOptions, IncidentEntry, ServiceCard};
pub use incident::{classify_labels, recent_incidents, Severity};
pub use status::{overall_status, HasStatus, OverallStatus};
pub use uptime::{daily_uptime, daily_uptime_until_now, DailyUptime, UptimeLevel};
