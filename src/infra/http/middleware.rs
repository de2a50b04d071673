use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

const METRIC_HTTP_REQUESTS: &str = "seo_http_requests_total";
const METRIC_HTTP_LATENCY_MS: &str = "seo_http_request_duration_ms";

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-request identifier shared with the response logger.
#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

/// Reuses a caller-supplied `x-request-id` when it is a usable header value,
/// otherwise mints one, and echoes it on the response.
pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(ctx);
    response
}

/// Coarse route label used for metrics and log fields; keeps path parameters
/// such as config keys out of metric labels.
pub fn route_family(path: &str) -> &'static str {
    match path {
        "/robots.txt" => "robots",
        "/_health/db" => "health",
        "/api/seo/analyze" => "api.analyze",
        "/api/seo/config" => "api.config",
        _ if path.starts_with("/sitemap") && path.ends_with(".xml") => "sitemap",
        _ if path.starts_with("/api/seo/meta/") => "api.meta",
        _ if path.starts_with("/api/seo/structured-data/") => "api.structured_data",
        _ if path.starts_with("/api/seo/config/") => "api.config",
        _ => "other",
    }
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = route_family(uri.path());
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    counter!(METRIC_HTTP_REQUESTS, "route" => route, "status" => status_class(status.as_u16()))
        .increment(1);
    histogram!(METRIC_HTTP_LATENCY_MS, "route" => route).record(elapsed_ms as f64);

    if !(status.is_client_error() || status.is_server_error()) {
        debug!(
            target = "akibeks_seo::http::response",
            status = status.as_u16(),
            method = %method,
            route,
            path = %uri.path(),
            elapsed_ms,
            request_id = %request_id,
            "request served",
        );
        return response;
    }

    let (source, messages) = match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => (report.source, report.messages),
        None => ("unrouted", Vec::new()),
    };
    let detail = messages
        .first()
        .map(String::as_str)
        .unwrap_or("no diagnostic available");

    if status.is_server_error() {
        error!(
            target = "akibeks_seo::http::response",
            status = status.as_u16(),
            method = %method,
            route,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms,
            source,
            detail,
            chain = ?messages,
            request_id = %request_id,
            "seo request failed",
        );
    } else {
        warn!(
            target = "akibeks_seo::http::response",
            status = status.as_u16(),
            method = %method,
            route,
            path = %uri.path(),
            elapsed_ms,
            source,
            detail,
            request_id = %request_id,
            "seo request rejected",
        );
    }

    response
}

fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_collapse_into_families() {
        assert_eq!(route_family("/sitemap.xml"), "sitemap");
        assert_eq!(route_family("/sitemap-images.xml"), "sitemap");
        assert_eq!(route_family("/robots.txt"), "robots");
        assert_eq!(route_family("/api/seo/meta/service"), "api.meta");
        assert_eq!(route_family("/api/seo/meta/project/42"), "api.meta");
        assert_eq!(route_family("/api/seo/config"), "api.config");
        assert_eq!(route_family("/api/seo/config/services"), "api.config");
        assert_eq!(route_family("/api/seo/config/about-us"), "api.config");
        assert_eq!(route_family("/api/seo/analyze"), "api.analyze");
        assert_eq!(
            route_family("/api/seo/structured-data/service/roofing"),
            "api.structured_data"
        );
        assert_eq!(route_family("/_health/db"), "health");
        assert_eq!(route_family("/sitemap"), "other");
        assert_eq!(route_family("/wp-admin"), "other");
    }

    #[test]
    fn statuses_group_by_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(304), "3xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
    }
}
