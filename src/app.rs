//! Application state and navigation logic.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::data::{DashboardData, DisplayOptions, IncidentEntry, ServiceCard};
use crate::source::{RefreshOutcome, StatusSource};
use crate::ui::Theme;

/// Shown to the user when the service summary cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load status data. Please try again.";

/// The current view/tab in the TUI.
///
/// Service detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Service cards with uptime strips.
    Services,
    /// Timeline of recent incidents.
    Incidents,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Services => View::Incidents,
            View::Incidents => View::Services,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        // Only two views, so previous and next coincide.
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Services => "Services",
            View::Incidents => "Incidents",
        }
    }
}

/// Where the refresh cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No cycle has settled yet.
    Loading,
    /// The last cycle succeeded.
    Ready,
    /// The last cycle failed; any earlier data is still shown.
    Error,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn StatusSource>,
    pub state: RefreshState,
    pub data: Option<DashboardData>,
    pub load_error: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub options: DisplayOptions,

    // Navigation state
    pub selected_service_index: usize,
    pub selected_incident_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and display options.
    pub fn new(source: Box<dyn StatusSource>, options: DisplayOptions) -> Self {
        Self::with_theme(source, options, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn StatusSource>, options: DisplayOptions, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Services,
            show_help: false,
            show_detail_overlay: false,
            source,
            state: RefreshState::Loading,
            data: None,
            load_error: None,
            last_refreshed: None,
            options,
            selected_service_index: 0,
            selected_incident_index: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain settled refresh cycles from the source.
    ///
    /// Returns true if at least one outcome was applied.
    pub fn reload_data(&mut self) -> bool {
        let mut updated = false;
        while let Some(outcome) = self.source.poll() {
            self.apply_outcome(outcome, Local::now().date_naive());
            updated = true;
        }
        updated
    }

    /// Apply one refresh outcome, with uptime strips ending on `today`.
    pub fn apply_outcome(&mut self, outcome: RefreshOutcome, today: NaiveDate) {
        match outcome {
            RefreshOutcome::Ready(snapshot) => {
                let data = DashboardData::from_snapshot(snapshot, &self.options, today);
                self.last_refreshed = Some(data.fetched_at);
                self.data = Some(data);
                self.load_error = None;
                self.state = RefreshState::Ready;
                self.clamp_selection();
            }
            RefreshOutcome::Failed(err) => {
                // Keep whatever was shown before
                self.load_error = Some(err);
                self.state = RefreshState::Error;
            }
        }
    }

    /// Ask the source for a fresh cycle (manual retry).
    pub fn retry(&mut self) {
        self.source.request_refresh();
        self.set_status_message("Refreshing...".to_string());
    }

    pub fn is_loading(&self) -> bool {
        self.state == RefreshState::Loading
    }

    pub fn has_error(&self) -> bool {
        self.state == RefreshState::Error
    }

    /// Incidents inside the display horizon as of now.
    pub fn visible_incidents(&self) -> Vec<&IncidentEntry> {
        self.data
            .as_ref()
            .map(|d| d.recent_incidents(Utc::now()))
            .unwrap_or_default()
    }

    /// The service under the cursor.
    pub fn selected_service(&self) -> Option<&ServiceCard> {
        self.data.as_ref()?.services.get(self.selected_service_index)
    }

    fn service_count(&self) -> usize {
        self.data.as_ref().map(|d| d.services.len()).unwrap_or(0)
    }

    fn incident_count(&self) -> usize {
        self.visible_incidents().len()
    }

    fn clamp_selection(&mut self) {
        let services = self.service_count();
        if self.selected_service_index >= services {
            self.selected_service_index = services.saturating_sub(1);
        }
        let incidents = self.incident_count();
        if self.selected_incident_index >= incidents {
            self.selected_incident_index = incidents.saturating_sub(1);
        }
        if services == 0 {
            self.show_detail_overlay = false;
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Services => {
                let max = self.service_count().saturating_sub(1);
                self.selected_service_index = (self.selected_service_index + n).min(max);
            }
            View::Incidents => {
                let max = self.incident_count().saturating_sub(1);
                self.selected_incident_index = (self.selected_incident_index + n).min(max);
            }
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Services => {
                self.selected_service_index = self.selected_service_index.saturating_sub(n);
            }
            View::Incidents => {
                self.selected_incident_index = self.selected_incident_index.saturating_sub(n);
            }
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Services => self.selected_service_index = 0,
            View::Incidents => self.selected_incident_index = 0,
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Services => {
                self.selected_service_index = self.service_count().saturating_sub(1);
            }
            View::Incidents => {
                self.selected_incident_index = self.incident_count().saturating_sub(1);
            }
        }
    }

    /// Open the detail overlay for the selected service.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Services && self.selected_service().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to Services.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        self.current_view = View::Services;
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the derived dashboard to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let json = serde_json::to_string_pretty(&data.export_json(Utc::now()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OverallStatus;
    use crate::source::fixtures::{incidents_json, service, summary_json};
    use crate::source::{
        ChannelSource, HttpSource, ServiceState, StatusClient, StatusSnapshot,
    };
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot::new(
            serde_json::from_str(summary_json()).unwrap(),
            serde_json::from_str(incidents_json()).unwrap(),
        )
    }

    fn channel_app() -> (tokio::sync::watch::Sender<Option<RefreshOutcome>>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::with_theme(Box::new(source), DisplayOptions::default(), Theme::dark());
        (tx, app)
    }

    /// Poll until the app applies an outcome.
    async fn settle(app: &mut App) {
        for _ in 0..200 {
            if app.reload_data() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no refresh outcome within 2s");
    }

    #[test]
    fn test_starts_loading() {
        let (_tx, mut app) = channel_app();
        assert!(app.is_loading());
        assert!(!app.reload_data());
        assert!(app.data.is_none());
        assert_eq!(app.source_description(), "channel: test");
    }

    #[test]
    fn test_ready_then_error_keeps_data() {
        let (tx, mut app) = channel_app();

        tx.send(Some(RefreshOutcome::Ready(snapshot()))).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.state, RefreshState::Ready);
        assert!(app.last_refreshed.is_some());
        assert_eq!(app.data.as_ref().unwrap().services.len(), 2);

        tx.send(Some(RefreshOutcome::Failed("Endpoint returned status 500".to_string())))
            .unwrap();
        assert!(app.reload_data());
        assert!(app.has_error());
        assert_eq!(app.load_error.as_deref(), Some("Endpoint returned status 500"));
        // Previous snapshot stays on screen
        assert_eq!(app.data.as_ref().unwrap().services.len(), 2);

        tx.send(Some(RefreshOutcome::Ready(snapshot()))).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.state, RefreshState::Ready);
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_error_before_any_data() {
        let (_tx, mut app) = channel_app();
        app.apply_outcome(RefreshOutcome::Failed("boom".to_string()), today());
        assert!(app.has_error());
        assert!(app.data.is_none());
        assert!(app.selected_service().is_none());
    }

    #[test]
    fn test_navigation_clamps() {
        let (_tx, mut app) = channel_app();
        app.apply_outcome(RefreshOutcome::Ready(snapshot()), today());

        app.select_next_n(10);
        assert_eq!(app.selected_service_index, 1);
        app.select_prev_n(10);
        assert_eq!(app.selected_service_index, 0);
        app.select_last();
        assert_eq!(app.selected_service().unwrap().service.slug, "api");

        // A smaller snapshot pulls the cursor back in range
        let smaller = StatusSnapshot::new(vec![service("only", ServiceState::Up)], vec![]);
        app.apply_outcome(RefreshOutcome::Ready(smaller), today());
        assert_eq!(app.selected_service_index, 0);
    }

    #[test]
    fn test_views_and_overlays() {
        let (_tx, mut app) = channel_app();
        app.enter_detail();
        assert!(!app.show_detail_overlay, "no detail without data");

        app.apply_outcome(RefreshOutcome::Ready(snapshot()), today());
        app.enter_detail();
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);

        app.next_view();
        assert_eq!(app.current_view, View::Incidents);
        app.enter_detail();
        assert!(!app.show_detail_overlay);
        app.go_back();
        assert_eq!(app.current_view, View::Services);

        app.toggle_help();
        assert!(app.show_help);
        app.quit();
        assert!(!app.running);
    }

    #[test]
    fn test_export_state() {
        let (_tx, mut app) = channel_app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        assert!(app.export_state(&path).is_err());

        app.apply_outcome(RefreshOutcome::Ready(snapshot()), today());
        app.export_state(&path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["overall"]["status"], "degraded");
        assert_eq!(exported["services"].as_array().unwrap().len(), 2);
    }

    fn client_for(server: &MockServer) -> StatusClient {
        StatusClient::builder()
            .summary_url(format!("{}/summary.json", server.uri()))
            .incidents_url(format!("{}/issues", server.uri()))
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_degraded_service_with_incident_outage() {
        let server = MockServer::start().await;
        let services = vec![
            service("web", ServiceState::Up),
            service("api", ServiceState::Up),
            service("cdn", ServiceState::Degraded),
        ];
        Mock::given(method("GET"))
            .and(path("/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&services))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/issues"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = HttpSource::spawn(client_for(&server), Duration::from_secs(3600));
        let mut app = App::with_theme(Box::new(source), DisplayOptions::default(), Theme::dark());
        settle(&mut app).await;

        assert_eq!(app.state, RefreshState::Ready);
        assert!(app.load_error.is_none());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.overall_status(), OverallStatus::Degraded);
        assert!(data.incidents.is_empty());
    }

    #[tokio::test]
    async fn test_summary_failure_then_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary.json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string(incidents_json()))
            .expect(2)
            .mount(&server)
            .await;

        let source = HttpSource::spawn(client_for(&server), Duration::from_secs(3600));
        let mut app = App::with_theme(Box::new(source), DisplayOptions::default(), Theme::dark());
        settle(&mut app).await;

        assert!(app.has_error());
        assert!(app.data.is_none());

        app.retry();
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
        settle(&mut app).await;
        assert!(app.has_error());
    }
}
