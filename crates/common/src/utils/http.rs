use axum::{routing::get, Json, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::types::Health;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Add the `/health` route and the request tracing layer every service shares.
pub fn finish_router(router: Router) -> Router {
    router.route("/health", get(health)).layer(
        TraceLayer::new_for_http()
            // one INFO span per request, without headers
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            // status code and latency
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx are logged at ERROR
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
