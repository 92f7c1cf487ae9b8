use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use common::utils::shutdown::shutdown_signal;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ProxyConfig;
use crate::proxy::{build_router, GatewayState};
use crate::upstream::HttpUpstream;

/// Wire the HTTP upstream and the routes from a proxy configuration.
pub fn build_app(config: &ProxyConfig) -> anyhow::Result<Router> {
    let upstream = HttpUpstream::new(config).context("build upstream http client")?;
    Ok(build_router(GatewayState::new(Arc::new(upstream))))
}

/// Serve the gateway until Ctrl+C.
pub async fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    let proxy_config = ProxyConfig::from_gateway_config(&cfg.gateway)?;
    for kind in proxy_config.routes.kinds() {
        let upstream = proxy_config.routes.upstream_url(kind).unwrap_or_default();
        info!(resource = %kind, %upstream, "route registered");
    }
    info!(
        connect_timeout = ?proxy_config.connect_timeout,
        request_timeout = ?proxy_config.request_timeout,
        "loaded gateway configuration"
    );

    let app = build_app(&proxy_config)?;
    let addr = cfg.gateway.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind gateway on {addr}"))?;
    info!(%addr, "gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("gateway"))
        .await?;
    Ok(())
}
