//! Pointer event grammar.
//!
//! All three pointer kinds share one payload shape. Only
//! [`PointerKind::Move`] changes engine state; down/up are accepted so the
//! same event stream can feed other consumers unchanged.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which pointer transition an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    #[serde(rename = "pointerDown")]
    Down,
    #[serde(rename = "pointerUp")]
    Up,
    #[serde(rename = "pointerMove")]
    Move,
}

/// A pointer event as sent by the host.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    /// Event discriminator.
    #[serde(rename = "type")]
    pub kind: PointerKind,
    /// Input-device pointer id; keys the presence entry.
    pub pointer_id: i64,
    /// Position in scene coordinates.
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub meta_key: bool,
}

impl PointerEvent {
    /// Build a `pointerMove` event with no modifiers held.
    #[cfg(test)]
    #[must_use]
    pub fn moved(pointer_id: i64, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            pointer_id,
            x,
            y,
            shift_key: false,
            alt_key: false,
            meta_key: false,
        }
    }

    /// Parse a raw event object. Returns `None` for anything outside the grammar.
    #[must_use]
    pub fn parse(raw: &Value) -> Option<Self> {
        match Self::deserialize(raw) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::trace!(%err, "ignoring unrecognised pointer event");
                None
            }
        }
    }
}
