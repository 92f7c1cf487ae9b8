//! Backend resource service. The served resource comes from the first
//! argument or `RESOURCE` (`users` or `orders`).

use common::utils::logging::init_logging_default;
use configs::AppConfig;
use dotenvy::dotenv;
use models::ResourceKind;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    dotenv().ok();
    init_logging_default();
    info!(service = "backend", event = "logger_init", "tracing subscriber initialized");
}

fn resource_kind() -> anyhow::Result<ResourceKind> {
    let raw = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RESOURCE").ok())
        .ok_or_else(|| anyhow::anyhow!("usage: backend <users|orders> (or set RESOURCE)"))?;
    Ok(raw.trim().parse()?)
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    let kind = match resource_kind() {
        Ok(kind) => kind,
        Err(e) => {
            error!(service = "backend", event = "bad_arguments", error = %e, "cannot determine resource");
            return std::process::ExitCode::FAILURE;
        }
    };

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "backend",
            resource = %kind,
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "backend", event = "config_invalid", error = %format!("{e:#}"), "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let worker_threads = cfg.backend(kind).worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "backend", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "backend",
        resource = %kind,
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "backend service starting"
    );

    match rt.block_on(server::run(kind, &cfg)) {
        Ok(()) => {
            info!(service = "backend", resource = %kind, event = "stop", %service_id, pid, "backend service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "backend", resource = %kind, event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
