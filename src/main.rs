//! Shout relay.
//!
//! Accepts `{"INPUT": ...}` on `POST /V1/SHOUT`, optionally checks a license
//! key, forwards the text to the upstream shout service and returns its
//! output with `?` upgraded to `‽` and `.` to `!`.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                   SHOUT RELAY                    │
//!   Client Request      │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ────────────────────┼─▶│  http   │──▶│ license  │──▶│    shout     │───┼──▶ Upstream
//!                       │  │ handler │   │ verifier │   │ upstream +   │   │    /V1/SHOUT
//!   Client Response     │  │         │◀──┼──────────┼───│ substitution │◀──┼───
//!   ◀───────────────────┼──└─────────┘   └────┬─────┘   └──────────────┘   │
//!                       │                     └──────────────────────────┼──▶ Licensing
//!                       │  ┌───────────┐ ┌───────────┐ ┌──────────────┐  │    service
//!                       │  │ keepalive │ │ lifecycle │ │observability │  │
//!                       │  └───────────┘ └───────────┘ └──────────────┘  │
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use shout_relay::config::resolve_config;
use shout_relay::lifecycle::{wait_for_signal, Shutdown};
use shout_relay::observability::{logging, metrics};
use shout_relay::HttpServer;

#[derive(Parser)]
#[command(name = "shout-relay")]
#[command(about = "HTTP relay in front of the upstream shout API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "SHOUT_RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(args.config.as_deref(), |key| std::env::var(key).ok())?;

    logging::init_logging(&config.observability);

    tracing::info!("shout-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.url,
        license_checks = config.license.enabled,
        keepalive = config.keepalive.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "LISTENING");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
