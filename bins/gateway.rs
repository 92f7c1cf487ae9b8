use common::utils::logging::init_logging_json;
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG and the config overrides apply
    dotenv().ok();
    init_logging_json();
    info!(service = "gateway", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    // instance context, no secrets
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "gateway",
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
            error!(service = "gateway", event = "config_invalid", error = %format!("{e:#}"), "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.gateway.worker_threads { builder.worker_threads(w); }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "gateway", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "gateway",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.gateway.worker_threads.unwrap_or_default(),
        "gateway service starting"
    );

    match rt.block_on(gateway::bootstrap::run(&cfg)) {
        Ok(()) => {
            info!(service = "gateway", event = "stop", %service_id, pid, "gateway service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "gateway", event = "run_failed", error = %format!("{e:#}"), "gateway::bootstrap::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
