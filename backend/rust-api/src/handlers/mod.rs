use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;
use crate::utils::time::now_timestamp;

pub mod analyze;

pub const AVAILABLE_ROUTES: [&str; 3] = ["GET /", "GET /health", "POST /analyze"];

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "LeetCode helper API is running",
        "service": "leetcode-helper-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "analyze": "POST /analyze { \"slug\": \"two-sum\" }",
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": now_timestamp(),
    }))
}

pub async fn route_not_found(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::debug!("No route for {} {}", method, uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "availableRoutes": AVAILABLE_ROUTES,
            "requestedRoute": format!("{} {}", method, uri.path()),
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// Protects the metrics endpoint with HTTP Basic Auth against `Config::metrics_auth`.
pub async fn metrics_auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = state
        .config
        .metrics_auth
        .as_deref()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let credentials = String::from_utf8(decoded).map_err(|_| StatusCode::UNAUTHORIZED)?;

    if credentials != expected {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
