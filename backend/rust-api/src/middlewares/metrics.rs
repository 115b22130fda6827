use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

const KNOWN_PATHS: [&str; 4] = ["/", "/health", "/analyze", "/metrics"];

/// Records request count and latency per method, route and status.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = path_label(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), path, status.as_str()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method.as_str(), path])
        .observe(duration);

    response
}

/// Collapses anything outside the route table to one label to bound cardinality.
/// Matching is exact, like the router: `/analyze/` is a 404 and labelled as such.
fn path_label(path: &str) -> &'static str {
    KNOWN_PATHS
        .into_iter()
        .find(|known| *known == path)
        .unwrap_or("unmatched")
}
