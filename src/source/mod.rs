//! Data source abstraction for receiving status snapshots.
//!
//! This module provides a trait-based abstraction for receiving refresh
//! outcomes from various sources (HTTP polling, local files, channels).

mod channel;
mod client;
mod file;
mod http;
mod snapshot;

pub use channel::ChannelSource;
pub use client::{StatusClient, StatusClientBuilder};
pub use file::FileSource;
pub use http::{HttpSource, MIN_REFRESH_INTERVAL};
pub use snapshot::{
    validate_services, Incident, IncidentState, Label, RefreshOutcome, ServiceState,
    ServiceStatus, StatusSnapshot, Window, DAY_FORMAT,
};

#[cfg(test)]
pub(crate) use snapshot::fixtures;

use std::fmt::Debug;

/// Trait for receiving refresh outcomes from various sources.
///
/// Implementations run refresh cycles in their own way (a background task, a
/// file read, an external producer) and hand back each settled cycle through
/// [`poll`](StatusSource::poll).
///
/// # Example
///
/// ```
/// use statusboard::{FileSource, RefreshOutcome, StatusSource};
///
/// let mut source = FileSource::new("summary.json");
/// match source.poll() {
///     Some(RefreshOutcome::Ready(snapshot)) => println!("{} services", snapshot.services.len()),
///     Some(RefreshOutcome::Failed(e)) => println!("failed: {}", e),
///     None => {}
/// }
/// ```
pub trait StatusSource: Send + Debug {
    /// Take the next settled refresh outcome, if any.
    ///
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<RefreshOutcome>;

    /// Ask for a refresh cycle as soon as possible (manual retry).
    fn request_refresh(&mut self);

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
