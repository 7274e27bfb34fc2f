//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe loop (probe.rs):
//!     Periodic timer
//!     → HTTP GET against the target
//!     → feed result into state.rs
//!
//! State machine (state.rs):
//!     Unhealthy ←→ Healthy
//!     With thresholds to prevent flapping
//!
//! Transitions:
//!     became healthy   → gate.start() (fire-and-forget)
//!     became unhealthy → gate.stop()  (synchronous)
//! ```

pub mod probe;
pub mod state;

pub use probe::HealthProbe;
pub use state::{HealthState, HealthTracker};
