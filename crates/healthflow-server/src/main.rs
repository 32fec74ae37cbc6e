//! HealthFlow Server — application entry point.

use clap::Parser;
use healthflow_db::{DbManager, run_migrations};
use healthflow_server::api::{AppState, create_router};
use healthflow_server::{ServerArgs, ServerError, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let args = ServerArgs::parse();
    telemetry::init(args.log_format);

    info!("Starting HealthFlow server...");

    let db = DbManager::connect(&args.db_config()).await?;
    run_migrations(db.client()).await?;

    let state = AppState::new(
        db.client().clone(),
        args.surge_config(),
        args.api_config(),
    )?;
    let app = create_router(state);

    let listener = TcpListener::bind(args.bind).await?;
    info!(addr = %args.bind, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HealthFlow server stopped.");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
