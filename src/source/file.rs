//! File-based data source.
//!
//! Reads a local copy of the service summary (and optionally the incident
//! list) instead of fetching them over HTTP.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::warn;

use super::snapshot::{validate_services, Incident, ServiceStatus, StatusSnapshot};
use super::{RefreshOutcome, StatusSource};
use crate::error::FetchError;

/// A data source that reads status snapshots from JSON files.
///
/// The summary file is essential and the incidents file is best-effort,
/// matching the HTTP failure policy. The source tracks the summary file's
/// modification time and only produces a new outcome when it changes or a
/// refresh is requested.
#[derive(Debug)]
pub struct FileSource {
    summary_path: PathBuf,
    incidents_path: Option<PathBuf>,
    description: String,
    last_modified: Option<SystemTime>,
    refresh_requested: bool,
}

impl FileSource {
    /// Create a new file source for the given summary path.
    pub fn new<P: AsRef<Path>>(summary_path: P) -> Self {
        let summary_path = summary_path.as_ref().to_path_buf();
        let description = format!("file: {}", summary_path.display());
        Self {
            summary_path,
            incidents_path: None,
            description,
            last_modified: None,
            refresh_requested: true,
        }
    }

    /// Also read incidents from the given path.
    pub fn with_incidents<P: AsRef<Path>>(mut self, incidents_path: P) -> Self {
        self.incidents_path = Some(incidents_path.as_ref().to_path_buf());
        self
    }

    /// Returns the summary path being monitored.
    pub fn path(&self) -> &Path {
        &self.summary_path
    }

    /// Get the summary file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.summary_path).ok()?.modified().ok()
    }

    fn read_services(&self) -> Result<Vec<ServiceStatus>, FetchError> {
        let content = fs::read_to_string(&self.summary_path)?;
        let services: Vec<ServiceStatus> = serde_json::from_str(&content)?;
        validate_services(&services)?;
        Ok(services)
    }

    fn read_incidents(&self) -> Vec<Incident> {
        let Some(ref path) = self.incidents_path else {
            return Vec::new();
        };

        let result: Result<Vec<Incident>, FetchError> = fs::read_to_string(path)
            .map_err(FetchError::from)
            .and_then(|content| Ok(serde_json::from_str(&content)?));

        result.unwrap_or_else(|e| {
            warn!(error = %e, path = %path.display(), "incident file unavailable, showing none");
            Vec::new()
        })
    }

    /// Read both files and settle them into one outcome.
    fn read_outcome(&self) -> RefreshOutcome {
        match self.read_services() {
            Ok(services) => RefreshOutcome::Ready(StatusSnapshot::new(services, self.read_incidents())),
            Err(e) => RefreshOutcome::Failed(e.to_string()),
        }
    }
}

impl StatusSource for FileSource {
    fn poll(&mut self) -> Option<RefreshOutcome> {
        let current_modified = self.get_modified_time();

        // Check if file has been modified (or has appeared) since last read
        let file_changed = current_modified.is_some() && current_modified != self.last_modified;

        if !(file_changed || self.refresh_requested) {
            return None;
        }

        // Recorded whatever the outcome, so a broken file is reported once
        self.refresh_requested = false;
        self.last_modified = current_modified;
        Some(self.read_outcome())
    }

    fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    fn description(&self) -> &str {
        &self.description
    }
}
