//! Periodic health probing of the upstream target.
//!
//! # Responsibilities
//! - Run the check timer loop until shutdown
//! - Perform one HTTP check per tick, bounded by the configured timeout
//! - Feed results into the state machine
//! - Open/close the gate on state transitions

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::time;

use crate::config::GateConfig;
use crate::health::state::{HealthState, HealthTracker};
use crate::net::TcpGate;
use crate::observability::metrics;

/// Drives the health check loop and gates the listener on its outcome.
///
/// The probe is the sole owner of the state machine; transitions reach the
/// gate only as start/stop calls.
pub struct HealthProbe {
    gate: Arc<TcpGate>,
    target: String,
    interval: Duration,
    tracker: HealthTracker,
    client: reqwest::Client,
}

impl HealthProbe {
    /// Build a probe from validated configuration.
    ///
    /// The HTTP client carries the check timeout, so a single check can never
    /// outlive it.
    pub fn new(config: &GateConfig, gate: Arc<TcpGate>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            gate,
            target: config.target.clone(),
            interval: Duration::from_secs(config.interval_secs),
            tracker: HealthTracker::new(config.healthy_threshold, config.unhealthy_threshold),
            client,
        })
    }

    /// Run the timer loop until the shutdown signal fires.
    ///
    /// Closes the gate (if open) before returning.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = time::interval(self.interval);
        let mut last_transition = Instant::now();

        tracing::info!(
            target = %self.target,
            state = %self.tracker.state(),
            "Probe starting"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let healthy = self.check_once().await;
                    metrics::record_check(healthy);

                    if let Some(state) = self.tracker.observe(healthy) {
                        tracing::info!(
                            state = %state,
                            elapsed = ?last_transition.elapsed(),
                            "Health state changed"
                        );
                        last_transition = Instant::now();
                        metrics::record_state(state);
                        self.apply_transition(state);
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Probe received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.gate.stop();
    }

    /// Perform a single health check.
    ///
    /// True iff the target answered with status 200 within the timeout. Any
    /// transport error, timeout, or other status is a plain failed result.
    pub async fn check_once(&self) -> bool {
        match self.client.get(self.target.as_str()).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(_) => false,
        }
    }

    /// Fire the side effect for a state transition.
    ///
    /// The gate is opened fire-and-forget so a slow bind cannot stall the
    /// tick loop; it is closed synchronously so the stop signal is sent
    /// before the next tick is evaluated.
    fn apply_transition(&self, state: HealthState) {
        match state {
            HealthState::Healthy => {
                let gate = Arc::clone(&self.gate);
                tokio::spawn(async move {
                    if let Err(e) = gate.start().await {
                        tracing::error!(error = %e, "Failed to open gate");
                        std::process::exit(1);
                    }
                });
            }
            HealthState::Unhealthy => self.gate.stop(),
        }
    }
}
