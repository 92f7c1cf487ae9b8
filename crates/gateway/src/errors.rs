use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::ResourceKind;
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Every failure the gateway reports to its clients.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unknown resource type {0:?}")]
    UnknownResource(String),
    #[error("{resource}: {source}")]
    Upstream {
        resource: ResourceKind,
        #[source]
        source: UpstreamError,
    },
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UnknownResource(_) => StatusCode::NOT_FOUND,
            GatewayError::Upstream { source, .. } => match source {
                UpstreamError::NotRouted(_) => StatusCode::NOT_FOUND,
                UpstreamError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                UpstreamError::Unreachable { .. }
                | UpstreamError::Transport { .. }
                | UpstreamError::Status { .. }
                | UpstreamError::Malformed { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }

    /// Stable machine-readable code carried in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::UnknownResource(_) => "unknown_resource",
            GatewayError::Upstream { source, .. } => match source {
                UpstreamError::NotRouted(_) => "unknown_resource",
                UpstreamError::Timeout { .. } => "upstream_timeout",
                UpstreamError::Unreachable { .. } => "upstream_unreachable",
                UpstreamError::Transport { .. } => "upstream_transport",
                UpstreamError::Status { .. } => "upstream_status",
                UpstreamError::Malformed { .. } => "malformed_upstream_response",
            },
        }
    }

    fn resource(&self) -> String {
        match self {
            GatewayError::UnknownResource(name) => name.clone(),
            GatewayError::Upstream { resource, .. } => resource.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
            "resource": self.resource(),
        });
        if let GatewayError::Upstream { source: UpstreamError::Status { status, .. }, .. } = &self {
            body["upstream_status"] = json!(status.as_u16());
        }
        (self.status(), Json(body)).into_response()
    }
}
