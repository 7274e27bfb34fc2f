//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → probe loop exits → gate closed → process exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
