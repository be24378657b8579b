//! Read-only views of the latest refresh.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use layers::SurfaceSnapshot;
use runtime::CycleStats;
use tracing::error;

use crate::AppState;

pub async fn surface(State(state): State<AppState>) -> Json<SurfaceSnapshot> {
    Json(state.current().surface.clone())
}

pub async fn status(State(state): State<AppState>) -> Json<CycleStats> {
    Json(state.current().stats.clone())
}

/// The vehicles drawn by the latest refresh as GeoJSON.
pub async fn vehicles(State(state): State<AppState>) -> Response {
    let current = state.current();
    let body = match serde_json::to_string(&current.vehicles) {
        Ok(v) => v,
        Err(err) => {
            error!("vehicle collection serialization failed: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "vehicles unavailable").into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/geo+json"),
    );
    headers.insert(http::header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    (StatusCode::OK, headers, Body::from(body)).into_response()
}
