//! Script replay against a running engine context.
//!
//! The host sends a resize and every scripted message, then waits for fresh
//! snapshots. A frame applies everything queued before it, but the first
//! snapshot after the last send may come from a frame that was already under
//! way, so at least [`MIN_FRAMES`] are awaited and the last one is returned.

use frames::{HostMessage, LogLevel, WorkerMessage};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::transport::{HostPort, TransportError};

/// Fewest snapshots awaited after the script has been sent.
pub const MIN_FRAMES: u32 = 2;

/// Errors raised while replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("engine channel failed: {0}")]
    Transport(#[from] TransportError),
    #[error("engine context exited before producing a frame")]
    EngineExited,
}

/// Logical viewport the script is replayed into.
#[derive(Debug, Clone, Copy)]
pub struct ReplayViewport {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
}

/// Send `messages` after a resize and return the last of `frames` snapshots.
///
/// # Errors
///
/// [`ReplayError::Transport`] if the engine hangs up while the script is being
/// sent, [`ReplayError::EngineExited`] if it exits before enough frames arrive.
pub async fn replay(
    port: &mut HostPort,
    viewport: ReplayViewport,
    messages: Vec<HostMessage>,
    frames: u32,
) -> Result<Value, ReplayError> {
    let ReplayViewport { width, height, zoom } = viewport;
    port.send(HostMessage::Resize { width, height, zoom }).await?;
    let sent = messages.len();
    for message in messages {
        port.send(message).await?;
    }
    for message in port.drain() {
        report(message);
    }
    debug!(sent, "script sent");
    await_frames(port, frames.max(MIN_FRAMES)).await
}

async fn await_frames(port: &mut HostPort, count: u32) -> Result<Value, ReplayError> {
    let mut last = None;
    let mut seen = 0;
    while seen < count {
        match port.recv().await.ok_or(ReplayError::EngineExited)? {
            WorkerMessage::State(state) => {
                seen += 1;
                last = Some(state);
            }
            other => report(other),
        }
    }
    last.ok_or(ReplayError::EngineExited)
}

fn report(message: WorkerMessage) {
    match message {
        WorkerMessage::Ready => debug!("engine ready"),
        WorkerMessage::Log { level, message } => match level {
            LogLevel::Debug => debug!(target: "engine", "{message}"),
            LogLevel::Info => info!(target: "engine", "{message}"),
            LogLevel::Warn => warn!(target: "engine", "{message}"),
            LogLevel::Error => error!(target: "engine", "{message}"),
        },
        WorkerMessage::State(_) => {}
    }
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;
