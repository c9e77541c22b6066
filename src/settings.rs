//! Layered settings.
//!
//! Settings are read from an optional TOML file, then overridden by
//! `STATUSBOARD_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::format::parse_duration;
use crate::data::DisplayOptions;
use crate::source::{StatusClient, MIN_REFRESH_INTERVAL};

/// Default configuration file, read from the working directory if present.
pub const DEFAULT_CONFIG_FILE: &str = "statusboard.toml";

/// Environment variable prefix (`STATUSBOARD_OWNER`, `STATUSBOARD_REPO`, ...).
pub const ENV_PREFIX: &str = "STATUSBOARD";

/// GitHub caps `per_page` at 100.
const MAX_INCIDENT_LIMIT: u32 = 100;

/// Dashboard settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Repository owner hosting the Upptime data.
    pub owner: String,
    /// Repository name hosting the Upptime data.
    pub repo: String,
    /// Branch the summary file is committed to.
    pub branch: String,
    /// Explicit summary URL, replacing the one derived from owner/repo.
    pub summary_url: Option<String>,
    /// Explicit incidents URL, replacing the one derived from owner/repo.
    pub incidents_url: Option<String>,
    /// Issue label marking incidents.
    pub incident_label: String,
    /// Most recent incidents to request.
    pub incident_limit: u32,
    /// Interval between refresh cycles, e.g. "5m".
    pub refresh_interval: String,
    /// Per-request timeout, e.g. "10s".
    pub request_timeout: String,
    /// Days in each uptime strip.
    pub window_days: usize,
    /// Fallback start date for services without downtime records.
    pub monitoring_started: Option<NaiveDate>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: "upptime".to_string(),
            repo: "upptime".to_string(),
            branch: "main".to_string(),
            summary_url: None,
            incidents_url: None,
            incident_label: "status".to_string(),
            incident_limit: 10,
            refresh_interval: "5m".to_string(),
            request_timeout: "10s".to_string(),
            window_days: 90,
            monitoring_started: None,
            user_agent: "statusboard".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) and the environment.
    ///
    /// An explicitly given file must exist; the default file is optional.
    /// Values are not checked here so that later overrides can still fix
    /// them: call [`Settings::validate`] once every layer is applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.summary_url.is_none() && (self.owner.is_empty() || self.repo.is_empty()) {
            bail!("owner and repo must be set when no summary_url is given");
        }
        if self.incident_limit == 0 || self.incident_limit > MAX_INCIDENT_LIMIT {
            bail!(
                "incident_limit must be between 1 and {}, got {}",
                MAX_INCIDENT_LIMIT,
                self.incident_limit
            );
        }

        let interval = self.refresh_interval()?;
        if interval < MIN_REFRESH_INTERVAL {
            bail!(
                "refresh_interval must be at least {:?}, got {}",
                MIN_REFRESH_INTERVAL,
                self.refresh_interval
            );
        }
        self.request_timeout()?;
        Ok(())
    }

    /// The service summary endpoint.
    pub fn summary_url(&self) -> String {
        self.summary_url.clone().unwrap_or_else(|| {
            format!(
                "https://raw.githubusercontent.com/{}/{}/{}/history/summary.json",
                self.owner, self.repo, self.branch
            )
        })
    }

    /// The incident list endpoint.
    pub fn incidents_url(&self) -> String {
        self.incidents_url.clone().unwrap_or_else(|| {
            format!(
                "https://api.github.com/repos/{}/{}/issues?state=all&labels={}&per_page={}",
                self.owner, self.repo, self.incident_label, self.incident_limit
            )
        })
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh_interval)
            .with_context(|| format!("Invalid refresh_interval '{}'", self.refresh_interval))
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        parse_duration(&self.request_timeout)
            .with_context(|| format!("Invalid request_timeout '{}'", self.request_timeout))
    }

    /// Options for deriving the dashboard from snapshots.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            window_days: self.window_days,
            monitoring_started: self.monitoring_started,
            ..DisplayOptions::default()
        }
    }

    /// Build an HTTP client for the configured endpoints.
    pub fn client(&self) -> Result<StatusClient> {
        let client = StatusClient::builder()
            .summary_url(self.summary_url())
            .incidents_url(self.incidents_url())
            .timeout(self.request_timeout()?)
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }
}
