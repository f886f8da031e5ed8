//! Templar proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ stats middleware ──▶ proxy handler ──▶ upstream
//!                   │
//!                   ▼
//!              MultiReporter
//!              ├── DebugReporter   (stdout)
//!              ├── StatsdReporter  (metrics → Prometheus)
//!              └── RiemannReporter (structured event log)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use templar::config::{load_config, validate_config, ConfigError, TemplarConfig};
use templar::observability::{logging, metrics};
use templar::stats::build_reporter;
use templar::HttpServer;

#[derive(Parser)]
#[command(name = "templar")]
#[command(about = "HTTP proxy with request lifecycle reporting", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every request event to stdout.
    #[arg(short, long)]
    debug: bool,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<TemplarConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TemplarConfig::default(),
    };

    if cli.debug {
        config.stats.debug = true;
    }
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "templar starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_ms = config.timeouts.request_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to install metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let reporter = Arc::new(build_reporter(&config.stats));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, reporter)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
