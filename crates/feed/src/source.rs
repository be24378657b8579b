//! Where vehicle reports come from.
//!
//! The map only ever reads one feed, but the refresh cycle talks to it
//! through [`VehicleSource`] so the cycle can be driven by canned data.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::FetchError;
use crate::report::{VehicleReport, decode_vehicles};

/// Halifax Transit vehicle positions, relayed as JSON.
pub const FEED_URL: &str = "https://prog2700.onrender.com/hrmbuses";

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A producer of the current set of mapped vehicles.
///
/// Each call is independent; implementations keep no state between calls.
pub trait VehicleSource: Send + Sync {
    fn fetch_vehicles(&self) -> BoxFuture<'_, Result<Vec<VehicleReport>, FetchError>>;
}

/// The live feed over HTTP: one plain GET per fetch, no retries.
pub struct HttpFeed {
    url: String,
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_url(FEED_URL, client)
    }

    pub(crate) fn with_url(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<VehicleReport>, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::with_source("feed request failed", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::new(format!("feed returned HTTP {}", status.as_u16())));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::with_source("feed body read failed", e))?;
        debug!(bytes = body.len(), "feed response received");

        decode_vehicles(&body)
    }
}

impl VehicleSource for HttpFeed {
    fn fetch_vehicles(&self) -> BoxFuture<'_, Result<Vec<VehicleReport>, FetchError>> {
        Box::pin(self.fetch())
    }
}

#[cfg(test)]
mod tests {
    use super::{FEED_URL, HttpFeed, VehicleSource};
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}/hrmbuses")
    }

    const BODY: &str = r#"{ "entity": [
        { "vehicle": { "trip": { "routeId": 3, "directionId": 0 },
            "position": { "latitude": 44.65, "longitude": -63.59, "bearing": 90 } } },
        { "vehicle": { "trip": { "routeId": 15, "directionId": 1 },
            "position": { "latitude": 44.66, "longitude": -63.60, "bearing": 45 } } }
    ] }"#;

    #[test]
    fn defaults_to_fixed_endpoint() {
        let feed = HttpFeed::new(reqwest::Client::new());
        assert_eq!(feed.url(), FEED_URL);
    }

    #[tokio::test]
    async fn fetches_and_filters() {
        let url = serve(Router::new().route("/hrmbuses", get(|| async { BODY }))).await;
        let feed = HttpFeed::with_url(url, reqwest::Client::new());

        let reports = feed.fetch_vehicles().await.expect("fetch");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].route_id.as_number(), Some(3));
    }

    #[tokio::test]
    async fn non_json_body_fails() {
        let url = serve(Router::new().route("/hrmbuses", get(|| async { "upstream asleep" }))).await;
        let feed = HttpFeed::with_url(url, reqwest::Client::new());

        let err = feed.fetch_vehicles().await.expect_err("not json");
        assert!(err.to_string().contains("not a vehicle feed document"));
    }

    #[tokio::test]
    async fn error_status_fails() {
        let app = Router::new().route(
            "/hrmbuses",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "{}") }),
        );
        let feed = HttpFeed::with_url(serve(app).await, reqwest::Client::new());

        let err = feed.fetch_vehicles().await.expect_err("status");
        assert_eq!(err.to_string(), "feed returned HTTP 503");
    }

    #[tokio::test]
    async fn refused_connection_fails() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let feed = HttpFeed::with_url(format!("http://{addr}/hrmbuses"), reqwest::Client::new());
        let err = feed.fetch_vehicles().await.expect_err("refused");
        assert!(err.to_string().starts_with("feed request failed"));
    }
}
