//! Chat relay server binary.
//!
//! Serves `POST /chat`, `GET /` and `GET /health`, forwarding chat messages
//! to the upstream completion API with a server-held credential.

mod error;
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use relay_api::config::ApiConfig;
use relay_core::Relay;
use tokio::signal;
use tracing::{info, warn};

/// CLI arguments. Each flag overrides the matching environment variable.
#[derive(Parser, Debug)]
#[command(name = "relay_server", about = "Chat relay HTTP server")]
struct Args {
    /// Address to listen on (overrides `BIND_ADDR`, default 0.0.0.0:8000).
    #[arg(long)]
    bind_addr: Option<String>,

    /// Upstream chat-completion URL (overrides `RELAY_UPSTREAM_URL`).
    #[arg(long)]
    upstream_url: Option<String>,

    /// Upstream timeout in seconds (overrides `RELAY_TIMEOUT_SECS`).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Append log output to this file in addition to stderr.
    #[arg(long, env = "RELAY_LOG_FILE")]
    log_file: Option<PathBuf>,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
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

    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> error::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let mut config = ApiConfig::from_env();
    if let Some(addr) = args.bind_addr {
        config.bind_addr = addr;
    }
    if let Some(url) = args.upstream_url {
        config.relay.endpoint = url;
    }
    if let Some(secs) = args.timeout_secs.filter(|s| *s > 0) {
        config.relay.timeout = Duration::from_secs(secs);
    }

    info!(
        bind_addr = %config.bind_addr,
        endpoint = %config.relay.endpoint,
        timeout_secs = config.relay.timeout.as_secs_f64(),
        "starting relay_server"
    );
    if config.relay.credential.is_none() {
        warn!("DEEPSEEK_API_KEY is not set; /chat will fail until it is configured");
    }

    let relay = Relay::new(config.relay)?;
    let app = relay_api::router(relay_api::AppState::new(relay));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("relay_server stopped");
    Ok(())
}
