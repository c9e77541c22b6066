// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # statusboard
//!
//! A terminal status dashboard for services monitored with Upptime.
//!
//! The dashboard polls two read-only JSON resources: the Upptime
//! `history/summary.json` file (service states, uptime and response times,
//! per-day downtime) and the GitHub issues used as incident reports. It
//! derives daily uptime strips, an overall status and incident severities,
//! and renders them in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(derivation)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Refresh state machine (loading/ready/error), navigation
//! - **[`source`]**: The [`StatusSource`] trait, the HTTP client and the
//!   periodic, file and channel sources
//! - **[`data`]**: Pure derivations: daily uptime, overall status, incident
//!   severity, formatting
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered file/environment settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the status repository of upptime/upptime
//! statusboard --owner upptime --repo upptime
//!
//! # Read local copies instead
//! statusboard --summary-file summary.json --incidents-file issues.json
//!
//! # One refresh cycle, derived dashboard as JSON
//! statusboard --export status.json
//! ```
//!
//! ### As a library with periodic HTTP refresh
//!
//! ```no_run
//! use std::time::Duration;
//! use statusboard::{App, DisplayOptions, HttpSource, StatusClient};
//!
//! # tokio_test::block_on(async {
//! let client = StatusClient::builder()
//!     .summary_url("https://raw.githubusercontent.com/upptime/upptime/master/history/summary.json")
//!     .incidents_url("https://api.github.com/repos/upptime/upptime/issues?state=all&labels=status")
//!     .build()
//!     .unwrap();
//! let source = HttpSource::spawn(client, Duration::from_secs(300));
//! let app = App::new(Box::new(source), DisplayOptions::default());
//! # });
//! ```
//!
//! ### Deriving the dashboard directly
//!
//! ```
//! use chrono::NaiveDate;
//! use statusboard::{DashboardData, DisplayOptions, OverallStatus, StatusSnapshot};
//!
//! let snapshot = StatusSnapshot::new(Vec::new(), Vec::new());
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let data = DashboardData::from_snapshot(snapshot, &DisplayOptions::default(), today);
//! assert_eq!(data.overall_status(), OverallStatus::Unknown);
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, RefreshState, View};
pub use data::{
    daily_uptime, overall_status, DailyUptime, DashboardData, DisplayOptions, OverallStatus,
    Severity, UptimeLevel,
};
pub use error::FetchError;
pub use settings::Settings;
pub use source::{
    ChannelSource, FileSource, HttpSource, Incident, RefreshOutcome, ServiceState,
    ServiceStatus, StatusClient, StatusSnapshot, StatusSource,
};
