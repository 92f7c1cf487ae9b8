use axum::Router;
use common::utils::shutdown::shutdown_signal;
use configs::AppConfig;
use models::{Order, Record, ResourceKind, User};
use service::ResourceCollection;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::build_router;

async fn router_for<R: Record>(seed_path: Option<&str>) -> Result<Router, StartupError> {
    let collection = ResourceCollection::<R>::load(seed_path)
        .await
        .map_err(|source| StartupError::Seed { resource: R::KIND, source })?;
    info!(resource = %R::KIND, count = collection.len(), "resource collection ready");
    Ok(build_router(collection))
}

/// Build the app of the backend serving `kind`.
pub async fn app_for(kind: ResourceKind, seed_path: Option<&str>) -> Result<Router, StartupError> {
    match kind {
        ResourceKind::Users => router_for::<User>(seed_path).await,
        ResourceKind::Orders => router_for::<Order>(seed_path).await,
    }
}

/// Serve the backend for `kind` until Ctrl+C.
pub async fn run(kind: ResourceKind, cfg: &AppConfig) -> Result<(), StartupError> {
    let backend = cfg.backend(kind);
    let app = app_for(kind, backend.seed_path.as_deref()).await?;

    let addr = backend.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(resource = %kind, %addr, "backend service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("backend"))
        .await?;
    Ok(())
}
