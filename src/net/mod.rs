//! Network layer: the gated TCP listener.
//!
//! # Data Flow
//! ```text
//! gate.start()
//!     → bind listener, arm fresh stop signal
//!     → accept loop (background task)
//!     → per connection: write "ok", close
//!
//! gate.stop()
//!     → stop signal fires
//!     → accept loop exits, listener drops, socket closes
//! ```

pub mod gate;

pub use gate::{GateError, TcpGate};
