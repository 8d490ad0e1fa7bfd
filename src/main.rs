//! HTTP Request & Response inspection service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ TraceLayer ─▶ metrics ─▶ CORS ─▶ compression ─▶ decompression
//!                                                                        │
//!                                                                        ▼
//!                                 catch-panic ─▶ route table ─▶ InboundRequest extractor
//!                                                                        │
//!     Client Response                                                    ▼
//!     ◀────────────── JSON ◀─────────────── handler ◀──────────── RequestSnapshot
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_inspector::config::resolve_config;
use http_inspector::lifecycle::Shutdown;
use http_inspector::observability::{logging, metrics};
use http_inspector::HttpServer;

#[derive(Parser)]
#[command(name = "http-inspector")]
#[command(about = "Echoes back a structured description of every HTTP request it receives", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the config file and the PORT variable).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.port)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        port = config.listener.port,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(err) = metrics::init_metrics(addr) {
                    tracing::error!(error = %err, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.socket_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "HTTP Request & Response Service running");
    tracing::info!("Visit http://localhost:{} to see available endpoints", local_addr.port());
    tracing::info!("Send requests to any endpoint to debug your HTTP calls");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
