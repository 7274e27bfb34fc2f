//! TCP health gate.
//!
//! Periodically checks an upstream HTTP target and keeps a TCP listen socket
//! bound only while the target is healthy, so load balancers limited to
//! TCP-level health checks can track an HTTP-level condition with hysteresis.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::GateConfig;
pub use health::{HealthProbe, HealthState, HealthTracker};
pub use lifecycle::Shutdown;
pub use net::TcpGate;
