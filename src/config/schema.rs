//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the health gate.
///
/// Immutable once validated; constructed from defaults, an optional TOML
/// file, and CLI overrides, in that order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Health check target URL. Required.
    pub target: String,

    /// Address the gate listens on while the target is healthy.
    pub address: String,

    /// Approximate time, in seconds, between health checks.
    pub interval_secs: u64,

    /// Time, in seconds, during which no response means a failed check.
    pub timeout_secs: u64,

    /// Consecutive successes required before an unhealthy target is
    /// considered healthy.
    pub healthy_threshold: u32,

    /// Consecutive failures required before the target is considered
    /// unhealthy.
    pub unhealthy_threshold: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            address: "0.0.0.0:8080".to_string(),
            interval_secs: 1,
            timeout_secs: 6,
            healthy_threshold: 3,
            unhealthy_threshold: 3,
        }
    }
}
