//! Typed messages carried by frames.
//!
//! The host sends [`HostMessage`]s into the engine context and receives
//! [`WorkerMessage`]s back. Conversion from a [`Frame`] is lenient: an
//! unknown syscall or an unreadable payload yields `None`, and the receiver
//! drops the frame.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::Frame;

/// Syscall for [`HostMessage::Resize`].
pub const SYSCALL_RESIZE: &str = "engine:resize";
/// Syscall for [`HostMessage::Execute`].
pub const SYSCALL_EXECUTE: &str = "engine:execute";
/// Syscall for [`HostMessage::Pointer`].
pub const SYSCALL_POINTER: &str = "engine:pointer";
/// Syscall for [`WorkerMessage::Ready`].
pub const SYSCALL_READY: &str = "engine:ready";
/// Syscall for [`WorkerMessage::Log`].
pub const SYSCALL_LOG: &str = "engine:log";
/// Syscall for [`WorkerMessage::State`].
pub const SYSCALL_STATE: &str = "scene:state";

/// Host → engine messages.
#[derive(Clone, Debug, PartialEq)]
pub enum HostMessage {
    /// New logical viewport size and host zoom factor.
    Resize { width: f64, height: f64, zoom: f64 },
    /// A raw command object for the engine's command grammar.
    Execute(Value),
    /// A raw pointer event object for the engine's pointer grammar.
    Pointer(Value),
}

#[derive(Serialize, Deserialize)]
struct ResizeData {
    width: f64,
    height: f64,
    #[serde(default = "unit_zoom")]
    zoom: f64,
}

fn unit_zoom() -> f64 {
    1.0
}

impl HostMessage {
    /// Wrap this message in a frame with the given sequence number.
    #[must_use]
    pub fn into_frame(self, seq: u64) -> Frame {
        match self {
            Self::Resize { width, height, zoom } => {
                Frame::new(seq, SYSCALL_RESIZE, json!({"width": width, "height": height, "zoom": zoom}))
            }
            Self::Execute(command) => Frame::new(seq, SYSCALL_EXECUTE, command),
            Self::Pointer(event) => Frame::new(seq, SYSCALL_POINTER, event),
        }
    }

    /// Read a host message out of a frame.
    #[must_use]
    pub fn from_frame(frame: Frame) -> Option<Self> {
        match frame.syscall.as_str() {
            SYSCALL_RESIZE => match serde_json::from_value::<ResizeData>(frame.data) {
                Ok(d) => Some(Self::Resize { width: d.width, height: d.height, zoom: d.zoom }),
                Err(_) => None,
            },
            SYSCALL_EXECUTE => Some(Self::Execute(frame.data)),
            SYSCALL_POINTER => Some(Self::Pointer(frame.data)),
            _ => None,
        }
    }
}

/// Severity of a [`WorkerMessage::Log`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Engine → host messages.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkerMessage {
    /// The engine is selected and accepting messages.
    Ready,
    /// A log line for the host console.
    Log { level: LogLevel, message: String },
    /// One frame's scene snapshot.
    State(Value),
}

impl WorkerMessage {
    /// Shorthand for an info-level log message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::Log { level: LogLevel::Info, message: message.into() }
    }

    /// Wrap this message in a frame with the given sequence number.
    #[must_use]
    pub fn into_frame(self, seq: u64) -> Frame {
        match self {
            Self::Ready => Frame::new(seq, SYSCALL_READY, json!({})),
            Self::Log { level, message } => {
                Frame::new(seq, SYSCALL_LOG, json!({"level": level, "message": message}))
            }
            Self::State(snapshot) => Frame::new(seq, SYSCALL_STATE, snapshot),
        }
    }

    /// Read a worker message out of a frame.
    #[must_use]
    pub fn from_frame(frame: Frame) -> Option<Self> {
        match frame.syscall.as_str() {
            SYSCALL_READY => Some(Self::Ready),
            SYSCALL_LOG => {
                let level = serde_json::from_value(frame.data.get("level")?.clone()).unwrap_or(LogLevel::Info);
                let message = frame.data.get("message")?.as_str()?.to_owned();
                Some(Self::Log { level, message })
            }
            SYSCALL_STATE => Some(Self::State(frame.data)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
