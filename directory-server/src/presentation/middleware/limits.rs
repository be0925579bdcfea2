use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::infrastructure::settings::Settings;

pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(settings.http_request_body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.http_request_timeout_secs),
        ))
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}
