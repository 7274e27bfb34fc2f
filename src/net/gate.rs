//! Gated TCP listener.
//!
//! # Responsibilities
//! - Bind the configured address while the target is healthy
//! - Answer each accepted connection with a fixed acknowledgment
//! - Tear down promptly on stop, unblocking any pending accept

use std::net::SocketAddr;
use std::sync::Mutex;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

/// Payload written to every accepted connection.
const ACK: &[u8] = b"ok";

/// Error type for gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// The listen address could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
}

/// A TCP acceptor that can be opened and closed repeatedly.
///
/// The gate's very existence as a bound socket is the signal: a TCP-level
/// health checker sees connections accepted while the upstream is healthy
/// and refused while it is not. Callers guarantee start/stop alternate; the
/// gate itself only guarantees stop is safe at any time.
pub struct TcpGate {
    address: SocketAddr,
    /// Stop signal for the live accept loop; `None` while closed. A fresh
    /// channel is armed on every start, so a stale signal cannot carry over.
    stop_signal: Mutex<Option<watch::Sender<()>>>,
}

impl TcpGate {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            stop_signal: Mutex::new(None),
        }
    }

    /// Address the gate binds when open.
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Bind the address and serve the accept loop in a background task.
    ///
    /// Returns as soon as the socket is bound; the accept loop keeps running
    /// until [`TcpGate::stop`]. A bind failure leaves the gate closed.
    pub async fn start(&self) -> Result<(), GateError> {
        let (tx, rx) = watch::channel(());
        // Arm the stop signal before binding: a stop that races the bind
        // still ends the accept loop.
        *self.stop_signal.lock().expect("gate stop lock poisoned") = Some(tx);

        let listener = match TcpListener::bind(self.address).await {
            Ok(listener) => listener,
            Err(source) => {
                self.stop_signal
                    .lock()
                    .expect("gate stop lock poisoned")
                    .take();
                return Err(GateError::Bind {
                    address: self.address,
                    source,
                });
            }
        };

        tracing::info!(address = %self.address, "Gate open, accepting connections");
        tokio::spawn(accept_loop(listener, rx));
        Ok(())
    }

    /// Close the gate.
    ///
    /// Sends the stop signal; the accept loop exits and drops the listener,
    /// which closes the socket and unblocks a pending accept. Safe to call
    /// on a gate that was never started or is already stopped.
    pub fn stop(&self) {
        match self
            .stop_signal
            .lock()
            .expect("gate stop lock poisoned")
            .take()
        {
            Some(tx) => {
                drop(tx);
                tracing::info!(address = %self.address, "Gate closed");
            }
            None => tracing::debug!("Gate stop requested while not open"),
        }
    }
}

/// Serve accepted connections until the stop signal fires or accept fails.
async fn accept_loop(listener: TcpListener, mut stop_rx: watch::Receiver<()>) {
    loop {
        tokio::select! {
            _ = stop_rx.changed() => {
                tracing::debug!("Accept loop stopping");
                break;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        tracing::debug!(peer_addr = %peer, "Gate connection accepted");
                        tokio::spawn(acknowledge(stream, peer));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to accept gate connection");
                        break;
                    }
                }
            }
        }
    }
    // Dropping the listener here closes the socket.
}

/// Write the acknowledgment and close the connection on every path.
async fn acknowledge(mut stream: TcpStream, peer: SocketAddr) {
    if let Err(e) = stream.write_all(ACK).await {
        tracing::debug!(peer_addr = %peer, error = %e, "Failed to write acknowledgment");
    }
    let _ = stream.shutdown().await;
}
