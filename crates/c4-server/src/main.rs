//! Connect Four session server: entry point.
//!
//! Accepts TCP connections, pairs them two at a time, and runs one
//! authoritative game per pair.
//!
//! # Usage
//!
//! ```text
//! c4-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>   TOML config file (missing file means defaults)
//!   --bind <ADDR>     IP address to listen on   [config default: 0.0.0.0]
//!   --port <PORT>     TCP port to listen on     [config default: 8000]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable    | Overrides          |
//! |-------------|--------------------|
//! | `C4_CONFIG` | `--config`         |
//! | `C4_BIND`   | `network.bind_address` |
//! | `C4_PORT`   | `network.port`     |
//! | `RUST_LOG`  | `server.log_level` |
//!
//! CLI args take precedence over environment variables, which take
//! precedence over the config file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use c4_server::infrastructure::network::SessionListener;
use c4_server::infrastructure::storage::config::{self, ServerConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Networked Connect Four session server.
#[derive(Debug, Parser)]
#[command(
    name = "c4-server",
    about = "Pairs Connect Four players and referees their games",
    version
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "C4_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to bind the listener to.
    #[arg(long, env = "C4_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "C4_PORT")]
    port: Option<u16>,
}

impl Cli {
    /// Loads the config file (if any) and applies command-line overrides.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_or_default(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            cfg.network.bind_address = bind;
        }
        if let Some(port) = self.port {
            cfg.network.port = port;
        }
        Ok(cfg)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Cli::parse().into_server_config()?;

    // `RUST_LOG` wins; otherwise use the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.server.log_level)),
        )
        .init();

    info!("Connect Four server starting");

    let addr = cfg
        .network
        .socket_addr()
        .context("invalid listen address")?;
    let listener = SessionListener::bind(addr, cfg.server.max_sessions)
        .await
        .with_context(|| format!("failed to start listener on {addr}"))?;

    info!(
        "Connect Four server ready on {}.  Press Ctrl-C to exit.",
        listener.local_addr()
    );

    listener
        .serve(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("shutdown signal received"),
                Err(e) => {
                    warn!("cannot listen for Ctrl-C: {e}");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    info!("Connect Four server stopped");
    Ok(())
}
