use anyhow::{Context, Result};
use axum::{Router, routing::get};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wavelink_server::{RelayState, health_handler, stats_handler, ws_handler};

/// Room-based signaling relay for two-endpoint audio telemetry sessions.
#[derive(Parser)]
#[command(name = "wavelink-relay")]
struct Args {
    /// Port the relay listens on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Address the relay binds to.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = RelayState::new();

    // Browser clients connect from a different origin than the relay.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from((args.bind, args.port));
    info!("Signaling relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
