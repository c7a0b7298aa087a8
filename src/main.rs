//! Demo server: a static handler fronted by the host gate.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use allowed_hosts::{host_gate_middleware, load_config, GateConfig, HostGate, HostGateState};

#[derive(Parser)]
#[command(name = "allowed-hosts")]
#[command(about = "Demo server enforcing a host allow-list", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "allowed_hosts=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.bind_address,
        allowed_hosts = config.allowed_hosts.len(),
        server_name = ?config.server_name,
        "Configuration loaded"
    );

    let gate = Arc::new(HostGate::new());
    gate.allow_many(&config.allowed_hosts);
    let state = HostGateState {
        gate,
        server_name: config.server_name.clone(),
    };

    let app = Router::new()
        .route("/", get(|| async { "OK" }))
        .layer(middleware::from_fn_with_state(state, host_gate_middleware))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
