//! Request logging.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;

/// Logs one `event=http_request` line per request with its matched route.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();
    if status >= 500 {
        warn!(
            "event=http_request module=web method={method} route={route} status={status} duration_ms={duration_ms}"
        );
    } else {
        info!(
            "event=http_request module=web method={method} route={route} status={status} duration_ms={duration_ms}"
        );
    }
    response
}
