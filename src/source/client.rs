//! HTTP client for the two upstream resources.
//!
//! The service summary is essential: any failure aborts the refresh cycle.
//! The incident list is best-effort: any failure yields an empty list.
//!
//! ## Example
//!
//! ```rust,no_run
//! use statusboard::StatusClient;
//!
//! # tokio_test::block_on(async {
//! let client = StatusClient::builder()
//!     .summary_url("https://raw.githubusercontent.com/upptime/upptime/master/history/summary.json")
//!     .incidents_url("https://api.github.com/repos/upptime/upptime/issues?state=all&labels=status&per_page=10")
//!     .build()
//!     .unwrap();
//!
//! let services = client.fetch_services().await.unwrap();
//! let incidents = client.fetch_incidents().await;
//! println!("{} services, {} incidents", services.len(), incidents.len());
//! # });
//! ```

use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, error, info, warn};

use super::snapshot::{validate_services, Incident, RefreshOutcome, ServiceStatus, StatusSnapshot};
use crate::error::FetchError;

/// Client for the service summary and incident list endpoints.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    summary_url: String,
    incidents_url: String,
}

impl StatusClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> StatusClientBuilder {
        StatusClientBuilder::default()
    }

    pub fn summary_url(&self) -> &str {
        &self.summary_url
    }

    pub fn incidents_url(&self) -> &str {
        &self.incidents_url
    }

    /// Fetch and validate the service summary.
    pub async fn fetch_services(&self) -> Result<Vec<ServiceStatus>, FetchError> {
        debug!(url = %self.summary_url, "fetching service summary");

        let response = self.client.get(&self.summary_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        let services: Vec<ServiceStatus> = serde_json::from_slice(&body)?;
        validate_services(&services)?;

        Ok(services)
    }

    /// Fetch the incident list, reporting any failure.
    pub async fn try_fetch_incidents(&self) -> Result<Vec<Incident>, FetchError> {
        debug!(url = %self.incidents_url, "fetching incidents");

        let response = self
            .client
            .get(&self.incidents_url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the incident list, degrading to an empty list on failure.
    pub async fn fetch_incidents(&self) -> Vec<Incident> {
        match self.try_fetch_incidents().await {
            Ok(incidents) => incidents,
            Err(e) => {
                warn!(error = %e, url = %self.incidents_url, "incident list unavailable, showing none");
                Vec::new()
            }
        }
    }

    /// Run one refresh cycle: both fetches concurrently, settled together.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (services, incidents) = tokio::join!(self.fetch_services(), self.fetch_incidents());

        match services {
            Ok(services) => {
                info!(
                    services = services.len(),
                    incidents = incidents.len(),
                    "refresh complete"
                );
                RefreshOutcome::Ready(StatusSnapshot::new(services, incidents))
            }
            Err(e) => {
                error!(error = %e, url = %self.summary_url, "service summary unavailable");
                RefreshOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Builder for StatusClient.
#[derive(Debug, Default)]
pub struct StatusClientBuilder {
    summary_url: Option<String>,
    incidents_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl StatusClientBuilder {
    /// Set the service summary URL.
    pub fn summary_url(mut self, url: impl Into<String>) -> Self {
        self.summary_url = Some(url.into());
        self
    }

    /// Set the incident list URL.
    pub fn incidents_url(mut self, url: impl Into<String>) -> Self {
        self.incidents_url = Some(url.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header (default: "statusboard").
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StatusClient, FetchError> {
        let summary_url = self
            .summary_url
            .ok_or_else(|| FetchError::Request("summary URL is required".to_string()))?;
        let incidents_url = self
            .incidents_url
            .ok_or_else(|| FetchError::Request("incidents URL is required".to_string()))?;

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(10)))
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("statusboard/", env!("CARGO_PKG_VERSION")).to_string()),
            )
            .build()?;

        Ok(StatusClient {
            client,
            summary_url,
            incidents_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures::{incidents_json, summary_json};
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StatusClient {
        StatusClient::builder()
            .summary_url(format!("{}/history/summary.json", server.uri()))
            .incidents_url(format!("{}/repos/o/r/issues", server.uri()))
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[test]
    fn test_builder_requires_urls() {
        assert!(StatusClient::builder().build().is_err());
        assert!(StatusClient::builder()
            .summary_url("http://localhost/summary.json")
            .build()
            .is_err());
    }

    #[tokio::test]
    async fn test_fetch_services() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/history/summary.json",
            ResponseTemplate::new(200).set_body_string(summary_json()),
        )
        .await;

        let services = client_for(&server).fetch_services().await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].slug, "website");
    }

    #[tokio::test]
    async fn test_fetch_services_non_success_is_error() {
        let server = MockServer::start().await;
        mount(&server, "/history/summary.json", ResponseTemplate::new(500)).await;

        let err = client_for(&server).fetch_services().await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_services_malformed_is_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/history/summary.json",
            ResponseTemplate::new(200).set_body_string(r#"{"not": "a list"}"#),
        )
        .await;

        let err = client_for(&server).fetch_services().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_services_invalid_shape_is_error() {
        let server = MockServer::start().await;
        let duplicated = summary_json().replace("\"slug\": \"api\"", "\"slug\": \"website\"");
        mount(
            &server,
            "/history/summary.json",
            ResponseTemplate::new(200).set_body_string(duplicated),
        )
        .await;

        let err = client_for(&server).fetch_services().await.unwrap_err();
        assert!(matches!(err, FetchError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_fetch_incidents_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(incidents_json()))
            .expect(1)
            .mount(&server)
            .await;

        let incidents = client_for(&server).fetch_incidents().await;
        assert_eq!(incidents.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_incidents_failure_is_empty() {
        for status in [403, 429, 500] {
            let server = MockServer::start().await;
            mount(&server, "/repos/o/r/issues", ResponseTemplate::new(status)).await;

            let client = client_for(&server);
            assert!(client.fetch_incidents().await.is_empty());
            assert!(matches!(
                client.try_fetch_incidents().await,
                Err(FetchError::Http { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_fetch_incidents_malformed_is_empty() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/repos/o/r/issues",
            ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"),
        )
        .await;

        assert!(client_for(&server).fetch_incidents().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_with_incident_failure_is_ready() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/history/summary.json",
            ResponseTemplate::new(200).set_body_string(summary_json()),
        )
        .await;
        mount(&server, "/repos/o/r/issues", ResponseTemplate::new(500)).await;

        match client_for(&server).refresh().await {
            RefreshOutcome::Ready(snapshot) => {
                assert_eq!(snapshot.services.len(), 2);
                assert!(snapshot.incidents.is_empty());
            }
            RefreshOutcome::Failed(e) => panic!("unexpected failure: {}", e),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_summary_failure_fails() {
        let server = MockServer::start().await;
        mount(&server, "/history/summary.json", ResponseTemplate::new(503)).await;
        mount(
            &server,
            "/repos/o/r/issues",
            ResponseTemplate::new(200).set_body_string(incidents_json()),
        )
        .await;

        let outcome = client_for(&server).refresh().await;
        assert_eq!(
            outcome,
            RefreshOutcome::Failed("Endpoint returned status 503".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_unreachable_fails() {
        let client = StatusClient::builder()
            .summary_url("http://127.0.0.1:9/summary.json")
            .incidents_url("http://127.0.0.1:9/issues")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        assert!(matches!(client.refresh().await, RefreshOutcome::Failed(_)));
    }
}
