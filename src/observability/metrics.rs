//! Metrics collection.
//!
//! # Metrics
//! - `gate_health_checks_total` (counter): checks by result
//! - `gate_healthy` (gauge): 1=healthy, 0=unhealthy

use metrics::{counter, gauge};

use crate::health::HealthState;

/// Record the outcome of a single health check.
pub fn record_check(healthy: bool) {
    let result = if healthy { "success" } else { "failure" };
    counter!("gate_health_checks_total", "result" => result).increment(1);
}

/// Record the debounced state after a transition.
pub fn record_state(state: HealthState) {
    let value = match state {
        HealthState::Healthy => 1.0,
        HealthState::Unhealthy => 0.0,
    };
    gauge!("gate_healthy").set(value);
}
