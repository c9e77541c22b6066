//! Periodic HTTP refresh.
//!
//! Spawns one background task that runs a refresh cycle on startup, then on
//! a fixed interval, and whenever a retry is requested.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{RefreshOutcome, StatusClient, StatusSource};

/// Shortest interval accepted for periodic refresh.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// A data source that polls the upstream endpoints on a schedule.
///
/// Cycles run strictly one after another inside the background task, so two
/// cycles never overlap. A retry requested while a cycle is in flight is
/// queued (at most one) and runs right after it. Dropping the source cancels
/// the task.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use statusboard::{HttpSource, StatusClient};
///
/// # tokio_test::block_on(async {
/// let client = StatusClient::builder()
///     .summary_url("https://example.com/history/summary.json")
///     .incidents_url("https://api.github.com/repos/o/r/issues")
///     .build()
///     .unwrap();
/// let source = HttpSource::spawn(client, Duration::from_secs(300));
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<RefreshOutcome>,
    trigger: mpsc::Sender<()>,
    handle: JoinHandle<()>,
    description: String,
}

impl HttpSource {
    /// Spawn the refresh task on the current tokio runtime.
    pub fn spawn(client: StatusClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(4);
        let (trigger_tx, mut trigger_rx) = mpsc::channel::<()>(1);
        let description = format!("http: {}", client.summary_url());
        let period = interval.max(MIN_REFRESH_INTERVAL);

        let handle = tokio::spawn(async move {
            // The first tick completes immediately, giving the startup refresh.
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!("scheduled refresh");
                    }
                    Some(()) = trigger_rx.recv() => {
                        debug!("manual refresh");
                        ticker.reset();
                    }
                }

                let outcome = client.refresh().await;
                if tx.send(outcome).await.is_err() {
                    // Receiver dropped
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            trigger: trigger_tx,
            handle,
            description,
        }
    }

    /// Stop the refresh task. Already-delivered outcomes remain pollable.
    pub fn shutdown(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl StatusSource for HttpSource {
    fn poll(&mut self) -> Option<RefreshOutcome> {
        self.receiver.try_recv().ok()
    }

    fn request_refresh(&mut self) {
        // A full channel means a retry is already queued.
        let _ = self.trigger.try_send(());
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures::{incidents_json, summary_json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StatusClient {
        StatusClient::builder()
            .summary_url(format!("{}/summary.json", server.uri()))
            .incidents_url(format!("{}/issues", server.uri()))
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    async fn next_outcome(source: &mut dyn StatusSource) -> RefreshOutcome {
        for _ in 0..200 {
            if let Some(outcome) = source.poll() {
                return outcome;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no refresh outcome within 2s");
    }

    #[tokio::test]
    async fn test_startup_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(summary_json()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string(incidents_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut source = HttpSource::spawn(client_for(&server), Duration::from_secs(3600));
        assert!(source.description().starts_with("http: "));

        match next_outcome(&mut source).await {
            RefreshOutcome::Ready(snapshot) => {
                assert_eq!(snapshot.services.len(), 2);
                assert_eq!(snapshot.incidents.len(), 2);
            }
            RefreshOutcome::Failed(e) => panic!("unexpected failure: {}", e),
        }

        // Nothing more until the next tick or a retry.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_retry_reissues_both_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary.json"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(summary_json()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string(incidents_json()))
            .expect(2)
            .mount(&server)
            .await;

        let mut source = HttpSource::spawn(client_for(&server), Duration::from_secs(3600));

        assert!(matches!(
            next_outcome(&mut source).await,
            RefreshOutcome::Failed(_)
        ));

        source.request_refresh();
        assert!(matches!(
            next_outcome(&mut source).await,
            RefreshOutcome::Ready(_)
        ));
    }

    #[tokio::test]
    async fn test_periodic_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(summary_json()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let mut source = HttpSource::spawn(client_for(&server), MIN_REFRESH_INTERVAL);
        assert!(matches!(next_outcome(&mut source).await, RefreshOutcome::Ready(_)));

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert!(matches!(next_outcome(&mut source).await, RefreshOutcome::Ready(_)));
    }

    #[tokio::test]
    async fn test_shutdown_stops_task() {
        let server = MockServer::start().await;
        let source = HttpSource::spawn(client_for(&server), Duration::from_secs(3600));

        source.shutdown();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!source.is_running());
    }
}
