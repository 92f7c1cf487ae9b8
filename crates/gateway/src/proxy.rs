use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use common::utils::http::finish_router;
use models::ResourceKind;
use tracing::{info, warn};

use crate::errors::GatewayError;
use crate::upstream::Upstream;

#[derive(Clone)]
pub struct GatewayState {
    pub upstream: Arc<dyn Upstream>,
}

impl GatewayState {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }
}

/// `GET /<resource>`: forward to the owning backend and relay its body unchanged.
pub async fn proxy(
    State(state): State<GatewayState>,
    Path(resource): Path<String>,
) -> Result<Response, GatewayError> {
    let kind: ResourceKind = resource
        .parse()
        .map_err(|_| GatewayError::UnknownResource(resource))?;

    match state.upstream.fetch(kind).await {
        Ok(forwarded) => {
            info!(resource = %kind, status = %forwarded.status, bytes = forwarded.body.len(), "relayed upstream response");
            Ok((forwarded.status, [(CONTENT_TYPE, "application/json")], forwarded.body).into_response())
        }
        Err(source) => {
            warn!(resource = %kind, error = %source, "upstream call failed");
            Err(GatewayError::Upstream { resource: kind, source })
        }
    }
}

pub fn build_router(state: GatewayState) -> Router {
    let api = Router::new()
        .route("/:resource", get(proxy))
        .with_state(state);
    finish_router(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{Forwarded, ForwardedResponse, UpstreamError};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body, Bytes};
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Answers users with a fixed body and fails orders as unreachable.
    struct FakeUpstream {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Upstream for FakeUpstream {
        async fn fetch(&self, kind: ResourceKind) -> ForwardedResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match kind {
                ResourceKind::Users => Ok(Forwarded {
                    status: StatusCode::OK,
                    body: Bytes::from_static(b"[ {\"id\":1,  \"name\":\"Henrique\",\"age\":28} ]"),
                }),
                ResourceKind::Orders => Err(UpstreamError::Unreachable {
                    url: "http://orders:4002/orders".into(),
                    reason: "connection refused".into(),
                }),
            }
        }
    }

    fn app() -> (Router, Arc<FakeUpstream>) {
        let fake = Arc::new(FakeUpstream { calls: AtomicUsize::new(0) });
        (build_router(GatewayState::new(fake.clone())), fake)
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Option<String>, Bytes) {
        let res = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        (status, content_type, to_bytes(res.into_body(), usize::MAX).await.unwrap())
    }

    #[tokio::test]
    async fn relays_body_byte_for_byte() {
        let (app, _) = app();
        let (status, content_type, body) = call(app, "/users").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(&body[..], b"[ {\"id\":1,  \"name\":\"Henrique\",\"age\":28} ]");
    }

    #[tokio::test]
    async fn upstream_failure_becomes_bad_gateway() {
        let (app, _) = app();
        let (status, _, body) = call(app, "/orders").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "upstream_unreachable");
        assert_eq!(json["resource"], "orders");
    }

    #[tokio::test]
    async fn unknown_resource_never_reaches_upstream() {
        let (app, fake) = app();
        let (status, _, body) = call(app, "/payments").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "unknown_resource");
        assert_eq!(json["resource"], "payments");
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn health_is_served_locally() {
        let (app, fake) = app();
        let (status, _, _) = call(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }
}
