use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use models::ResourceKind;
use serde::de::IgnoredAny;
use thiserror::Error;
use tracing::debug;

use crate::config::{ProxyConfig, RoutingTable};

/// A backend reply accepted for relaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarded {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("no backend configured for {0}")]
    NotRouted(ResourceKind),
    #[error("{url} did not answer within {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("cannot connect to {url}: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
    #[error("{url} returned a payload that is not a JSON array: {reason}")]
    Malformed { url: String, reason: String },
}

/// Outcome of one forwarded call; dropped once relayed.
pub type ForwardedResponse = Result<Forwarded, UpstreamError>;

#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch the full listing of `kind` from its backend.
    async fn fetch(&self, kind: ResourceKind) -> ForwardedResponse;
}

/// Upstream over HTTP with bounded connect and total request time.
pub struct HttpUpstream {
    client: reqwest::Client,
    routes: RoutingTable,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl HttpUpstream {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            routes: config.routes.clone(),
            connect_timeout: config.connect_timeout,
            request_timeout: config.request_timeout,
        })
    }

    /// A timeout while connecting is bounded by `connect_timeout`, any later one by `request_timeout`.
    fn applied_timeout(&self, while_connecting: bool) -> Duration {
        if while_connecting {
            self.connect_timeout
        } else {
            self.request_timeout
        }
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> UpstreamError {
        let url = url.to_string();
        if e.is_timeout() {
            UpstreamError::Timeout { url, timeout: self.applied_timeout(e.is_connect()) }
        } else if e.is_connect() {
            UpstreamError::Unreachable { url, reason: e.to_string() }
        } else {
            UpstreamError::Transport { url, reason: e.to_string() }
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, kind: ResourceKind) -> ForwardedResponse {
        let url = self
            .routes
            .upstream_url(kind)
            .ok_or(UpstreamError::NotRouted(kind))?;
        debug!(resource = %kind, %url, "forwarding request");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        let body = resp.bytes().await.map_err(|e| self.classify(&url, e))?;
        ensure_record_array(&body).map_err(|reason| UpstreamError::Malformed {
            url: url.clone(),
            reason,
        })?;
        debug!(resource = %kind, %url, %status, bytes = body.len(), "upstream answered");
        Ok(Forwarded { status, body })
    }
}

/// The payload must be a JSON array; its elements stay opaque.
pub fn ensure_record_array(body: &[u8]) -> Result<(), String> {
    serde_json::from_slice::<Vec<IgnoredAny>>(body)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
