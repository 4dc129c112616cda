//! ard-dashboard - AI research dashboard service
//!
//! Serves the dashboard page and the JSON/SSE API that drives one
//! upload → select → analyze → render session.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ard_common::config::{load_toml_config, resolve_config_path};
use ard_common::events::{DashboardEvent, EventBus};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ard_dashboard::config::{DashboardConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use ard_dashboard::workflow::WorkflowController;
use ard_dashboard::AppState;

/// Command-line arguments for ard-dashboard
#[derive(Parser, Debug)]
#[command(name = "ard-dashboard")]
#[command(about = "AI research dashboard service")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // CLI path, then ARD_CONFIG, then the user config directory
    let config_path = resolve_config_path(args.config.as_deref(), CONFIG_ENV_VAR, CONFIG_FILE_NAME);
    let mut config: DashboardConfig =
        load_toml_config(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    // Initialize tracing; RUST_LOG wins over logging.level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter_directive("ard_dashboard").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ard-dashboard (AI Research Dashboard)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: built-in defaults"),
    }

    config.validate().context("Invalid configuration")?;

    let event_bus = EventBus::new(config.server.event_capacity);
    let controller = WorkflowController::from_config(&config, event_bus.clone())
        .context("Failed to create analysis executor")?;
    info!(
        executor = ?config.executor.kind,
        max_file_size_bytes = config.intake.max_file_size_bytes,
        accepted_types = %config.intake.accepted_types,
        "Workflow controller initialized"
    );

    let state = AppState::new(controller.clone(), event_bus);
    spawn_error_recorder(state.clone());

    let app = ard_dashboard::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.bind, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    controller.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Keep the last failed run's message for `/health`
fn spawn_error_recorder(state: AppState) {
    let mut rx = state.event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(DashboardEvent::AnalysisFailed { run_id, error, .. }) => {
                    state.record_error(format!("run {}: {}", run_id, error)).await;
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Error recorder lagged behind the event bus");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
