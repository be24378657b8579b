use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use feed::HttpFeed;
use layers::MapSurface;
use runtime::{MapState, RenderCycle, Ticker, REFRESH_PERIOD};
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod live;
mod map;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const BUS_ICON: &[u8] = include_bytes!("../assets/bus.png");

#[derive(Clone)]
struct AppState {
    map: watch::Receiver<Arc<MapState>>,
}

impl AppState {
    fn current(&self) -> Arc<MapState> {
        Arc::clone(&self.map.borrow())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr = env_var_addr("BUSMAP_ADDR", "127.0.0.1:8080");

    // A fetch may not outlive its tick.
    let http = match reqwest::Client::builder().timeout(REFRESH_PERIOD).build() {
        Ok(client) => client,
        Err(err) => {
            error!("http client setup failed: {err}");
            return;
        }
    };
    let feed = HttpFeed::new(http);
    info!("polling {} every {:?}", feed.url(), REFRESH_PERIOD);

    let mut cycle = RenderCycle::new(MapSurface::halifax(), Box::new(feed));
    let state = AppState {
        map: cycle.subscribe(),
    };

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("ctrl-c handler failed: {err}");
            return;
        }
        info!("shutting down");
        let _ = stop_tx.send(true);
    });

    let ticker = tokio::spawn({
        let stop = stop_rx.clone();
        async move {
            Ticker::new().run(&mut cycle, stopped(stop)).await;
        }
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = Router::new()
        .route("/", get(index))
        .route("/bus.png", get(bus_icon))
        .route("/healthz", get(healthz))
        .route("/surface", get(map::surface))
        .route("/vehicles.geojson", get(map::vehicles))
        .route("/status", get(map::status))
        .route("/live", get(live::live))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return;
        }
    };

    info!("bus map listening on http://{addr}");
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(stopped(stop_rx))
        .await
    {
        error!("server error: {err}");
    }

    if let Err(err) = ticker.await {
        error!("refresh loop ended abnormally: {err}");
    }
}

async fn stopped(mut stop: watch::Receiver<bool>) {
    // A dropped sender also counts as a stop.
    let _ = stop.wait_for(|stop| *stop).await;
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn bus_icon() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("image/png"),
    );
    headers.insert(
        http::header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );
    (StatusCode::OK, headers, BUS_ICON).into_response()
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

fn env_var_addr(key: &str, default: &str) -> SocketAddr {
    let fallback = || default.parse().unwrap_or(SocketAddr::from(([127, 0, 0, 1], 8080)));
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            warn!("ignoring invalid {key}={raw:?}: {err}");
            fallback()
        }),
        Err(_) => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::{bus_icon, env_var_addr, index, BUS_ICON};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn index_mounts_map_container() {
        let html = index().await.0;
        assert!(html.contains("id=\"theMap\""));
        assert!(html.contains("/live"));
    }

    #[tokio::test]
    async fn serves_png_icon() {
        let resp = bus_icon().await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "image/png");
        assert_eq!(&BUS_ICON[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn unset_addr_uses_default() {
        let addr = env_var_addr("BUSMAP_TEST_ADDR_UNSET", "127.0.0.1:9999");
        assert_eq!(addr.port(), 9999);
    }
}
