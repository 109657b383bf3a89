//! Host ↔ engine channel carrying encoded frames.
//!
//! DESIGN
//! ======
//! Each direction is a bounded tokio mpsc queue of protobuf-encoded
//! [`frames::Frame`]s, so nothing crosses the boundary except bytes. Every
//! port stamps its own outbound sequence numbers.
//!
//! ERROR HANDLING
//! ==============
//! Receivers are lenient: a frame that fails to decode or names an unknown
//! syscall is logged and skipped. The worker side never blocks on send; when
//! the host falls behind, frames are dropped and the caller decides whether
//! that matters.

use frames::{HostMessage, WorkerMessage, decode_frame, encode_frame};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Errors raised when a message cannot be handed to the other side.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The other side has gone away.
    #[error("channel closed")]
    Closed,
    /// The bounded queue is full.
    #[error("channel full")]
    Full,
}

/// Create a connected pair of ports, each direction bounded by `capacity`.
#[must_use]
pub fn channel(capacity: usize) -> (HostPort, WorkerPort) {
    let capacity = capacity.max(1);
    let (to_worker, from_host) = mpsc::channel(capacity);
    let (to_host, from_worker) = mpsc::channel(capacity);
    (
        HostPort { tx: to_worker, rx: from_worker, seq: 0 },
        WorkerPort { tx: to_host, rx: from_host, seq: 0 },
    )
}

/// The host's end: sends commands in, receives snapshots and logs out.
#[derive(Debug)]
pub struct HostPort {
    tx: mpsc::Sender<Vec<u8>>,
    rx: mpsc::Receiver<Vec<u8>>,
    seq: u64,
}

impl HostPort {
    /// Send a message to the engine, waiting for queue space.
    ///
    /// # Errors
    ///
    /// [`TransportError::Closed`] when the engine context has exited.
    pub async fn send(&mut self, message: HostMessage) -> Result<(), TransportError> {
        self.seq += 1;
        let bytes = encode_frame(&message.into_frame(self.seq));
        self.tx.send(bytes).await.map_err(|_| TransportError::Closed)
    }

    /// Wait for the next message from the engine. `None` once it has exited.
    pub async fn recv(&mut self) -> Option<WorkerMessage> {
        loop {
            let bytes = self.rx.recv().await?;
            if let Some(message) = decode_worker(&bytes) {
                return Some(message);
            }
        }
    }

    /// Take every message already queued, without waiting.
    pub fn drain(&mut self) -> Vec<WorkerMessage> {
        let mut out = Vec::new();
        while let Ok(bytes) = self.rx.try_recv() {
            out.extend(decode_worker(&bytes));
        }
        out
    }
}

/// The engine context's end: receives commands, emits snapshots and logs.
#[derive(Debug)]
pub struct WorkerPort {
    tx: mpsc::Sender<Vec<u8>>,
    rx: mpsc::Receiver<Vec<u8>>,
    seq: u64,
}

impl WorkerPort {
    /// Wait for the next message from the host. `None` once the host has hung up.
    ///
    /// Cancel safe: a frame is either returned or still queued.
    pub async fn recv(&mut self) -> Option<HostMessage> {
        loop {
            let bytes = self.rx.recv().await?;
            if let Some(message) = decode_host(&bytes) {
                return Some(message);
            }
        }
    }

    /// Take the next already-queued host message without waiting.
    ///
    /// Undecodable frames are skipped; `None` means nothing usable is queued.
    pub fn try_recv(&mut self) -> Option<HostMessage> {
        while let Ok(bytes) = self.rx.try_recv() {
            if let Some(message) = decode_host(&bytes) {
                return Some(message);
            }
        }
        None
    }

    /// Queue a message for the host without waiting.
    ///
    /// # Errors
    ///
    /// [`TransportError::Full`] when the host is behind, [`TransportError::Closed`]
    /// when it has hung up. The message is dropped in both cases.
    pub fn send(&mut self, message: WorkerMessage) -> Result<(), TransportError> {
        self.seq += 1;
        let bytes = encode_frame(&message.into_frame(self.seq));
        self.tx.try_send(bytes).map_err(|e| match e {
            TrySendError::Full(_) => TransportError::Full,
            TrySendError::Closed(_) => TransportError::Closed,
        })
    }
}

fn decode_host(bytes: &[u8]) -> Option<HostMessage> {
    let frame = match decode_frame(bytes) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, len = bytes.len(), "dropping undecodable host frame");
            return None;
        }
    };
    let (seq, syscall) = (frame.seq, frame.syscall.clone());
    let message = HostMessage::from_frame(frame);
    if message.is_none() {
        debug!(seq, %syscall, "dropping unrecognized host frame");
    }
    message
}

fn decode_worker(bytes: &[u8]) -> Option<WorkerMessage> {
    let frame = match decode_frame(bytes) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, len = bytes.len(), "dropping undecodable engine frame");
            return None;
        }
    };
    let (seq, syscall) = (frame.seq, frame.syscall.clone());
    let message = WorkerMessage::from_frame(frame);
    if message.is_none() {
        debug!(seq, %syscall, "dropping unrecognized engine frame");
    }
    message
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
