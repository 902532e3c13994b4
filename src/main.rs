//! Front controller (v1)
//!
//! A single entry point for every HTTP request, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                  FRONT CONTROLLER                    │
//!                     │                                                      │
//!   Client Request    │  ┌─────────┐    ┌────────────┐    ┌──────────────┐   │
//!   ──────────────────┼─▶│  http   │───▶│ Dispatcher │───▶│   Handler    │   │
//!                     │  │ server  │    │  (lookup)  │    │   Registry   │   │
//!                     │  └─────────┘    └─────┬──────┘    └──────────────┘   │
//!                     │                       │                              │
//!                     │                       ▼                              │
//!                     │                ┌────────────┐     ┌──────────────┐   │
//!                     │                │  Handler   │────▶│  Controller  │   │
//!                     │                │  Adapter   │     │  (v1 .. v4)  │   │
//!                     │                └─────┬──────┘     └──────────────┘   │
//!                     │                      │ ModelView                     │
//!                     │                      ▼                               │
//!   Client Response   │  ┌─────────┐    ┌────────────┐                       │
//!   ◀─────────────────┼──│response │◀───│    View    │ (resolver + tera)     │
//!                     │  └─────────┘    └────────────┘                       │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use front_controller::app::{self, member::MemberRepository};
use front_controller::config::{load_config, validation::validate_config, ConfigError, ServerConfig};
use front_controller::lifecycle::{signals, Shutdown};
use front_controller::observability::{logging, metrics};
use front_controller::HttpServer;

#[derive(Parser)]
#[command(name = "front-controller")]
#[command(about = "Front-controller dispatch server for the member demo", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate configuration, templates and adapter coverage, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("front-controller v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        template_dir = %config.views.template_dir,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let repository = Arc::new(MemberRepository::new());
    let dispatcher = app::build_dispatcher(&config.views, repository)?;
    dispatcher.verify()?;

    tracing::info!(
        handlers = dispatcher.registry().len(),
        adapters = ?dispatcher.adapter_names(),
        "Dispatcher ready"
    );
    for path in dispatcher.registry().paths() {
        tracing::debug!(path = %path, "Mapped");
    }

    if cli.check {
        tracing::info!("Check passed");
        return Ok(());
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stop = shutdown.notified();
    tokio::spawn(async move {
        signals::wait_for_signal(&shutdown).await;
    });

    let server = HttpServer::new(config, Arc::new(dispatcher));
    server.run_until(listener, stop).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
