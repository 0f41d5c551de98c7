use std::process::ExitCode;

use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
    info!(service = "album-store", event = "logger_init", ?format, "tracing subscriber initialized");
}

fn main() -> ExitCode {
    // .env first so RUST_LOG and the SERVER_* overrides apply
    dotenv().ok();

    let config = server::startup::load_config();
    let format = config.as_ref().map(|c| c.log.format).unwrap_or_default();
    init_logging(format);

    let config: AppConfig = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "album-store", event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "album-store",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = config.server.worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "album-store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "album-store",
        event = "start",
        %service_id,
        pid,
        version,
        threads = config.server.worker_threads.unwrap_or_default(),
        "album store starting"
    );

    // server::run returns once Ctrl+C has drained in-flight requests
    match rt.block_on(server::run(&config.server)) {
        Ok(()) => {
            info!(service = "album-store", event = "stop", %service_id, pid, "album store stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "album-store", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
