//! TCP health gate binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────┐
//!                  │                HEALTH GATE                  │
//!                  │                                             │
//!   HTTP target ◀──┼── health probe ──▶ state machine            │
//!                  │        (timer loop)     │ transitions       │
//!                  │                         ▼                   │
//!   TCP checker ◀──┼──────────────── gated listener              │
//!                  │                  (bound ⟷ closed)           │
//!                  │                                             │
//!                  │  config · lifecycle · observability         │
//!                  └────────────────────────────────────────────┘
//! ```
//!
//! The gate binds its address while the target is healthy and closes it
//! while the target is not; each accepted connection is answered with `ok`
//! and closed.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use health_gate::config::{loader, validate_config, ConfigError, GateConfig};
use health_gate::health::HealthProbe;
use health_gate::lifecycle::{signals, Shutdown};
use health_gate::net::TcpGate;
use health_gate::observability::logging;

#[derive(Parser)]
#[command(name = "health-gate")]
#[command(about = "Gates a TCP listener on the health of an upstream HTTP target", long_about = None)]
struct Cli {
    /// Health check target URL (e.g. http://example.org/health)
    target: Option<String>,

    /// Address the gate listens on
    #[arg(short, long)]
    address: Option<String>,

    /// Approximate time, in seconds, between health checks
    #[arg(short, long)]
    interval: Option<u64>,

    /// Time, in seconds, during which no response means a failed check
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Consecutive successes before an unhealthy target is considered healthy
    #[arg(long)]
    healthy_threshold: Option<u32>,

    /// Consecutive failures before the target is considered unhealthy
    #[arg(long)]
    unhealthy_threshold: Option<u32>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Resolve configuration: defaults, then file, then explicit CLI flags.
fn resolve_config(cli: Cli) -> Result<GateConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => GateConfig::default(),
    };

    if let Some(target) = cli.target {
        config.target = target;
    }
    if let Some(address) = cli.address {
        config.address = address;
    }
    if let Some(interval) = cli.interval {
        config.interval_secs = interval;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(threshold) = cli.healthy_threshold {
        config.healthy_threshold = threshold;
    }
    if let Some(threshold) = cli.unhealthy_threshold {
        config.unhealthy_threshold = threshold;
    }

    Ok(config)
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(error = %error, "Invalid configuration");
        }
        std::process::exit(1);
    }

    // Parse cannot fail after validation, but the core takes a typed address.
    let address: SocketAddr = match config.address.parse() {
        Ok(address) => address,
        Err(e) => {
            tracing::error!(address = %config.address, error = %e, "Invalid listen address");
            std::process::exit(1);
        }
    };

    tracing::info!(
        target = %config.target,
        address = %address,
        interval_secs = config.interval_secs,
        timeout_secs = config.timeout_secs,
        healthy_threshold = config.healthy_threshold,
        unhealthy_threshold = config.unhealthy_threshold,
        "Configuration loaded"
    );

    let gate = Arc::new(TcpGate::new(address));
    let probe = match HealthProbe::new(&config, Arc::clone(&gate)) {
        Ok(probe) => probe,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build health check client");
            std::process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    let probe_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let signal = signals::shutdown_signal().await;
        tracing::info!(signal, "Shutdown signal received");
        shutdown.trigger();
    });

    probe.run(probe_shutdown).await;

    tracing::info!("Shutdown complete");
}
