use tracing::{info, warn};

/// Resolves on Ctrl+C; used with `axum::serve(..).with_graceful_shutdown`.
pub async fn shutdown_signal(service: &'static str) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(service, event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(service, error = %e, "cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
