//! Command grammar: the only way geometry enters the scene.
//!
//! Commands arrive from the host as JSON objects with a `type` discriminator.
//! [`Command::parse`] is the closed parse step at the facade boundary: every
//! recognised shape of input becomes a typed [`Command`], and anything else
//! (unknown discriminator, missing or mistyped fields) becomes `None` and is
//! dropped without signalling the caller.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single scene mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Append a rectangle with an engine-generated id and name.
    CreateRectangle { x: f64, y: f64, width: f64, height: f64, color: String },
    /// Open a stroke under a caller-supplied id with its first point.
    StartStroke { id: String, x: f64, y: f64, size: f64, color: String },
    /// Append a point to the active stroke `id`, if any.
    UpdateStroke { id: String, x: f64, y: f64 },
    /// Close the editing window of stroke `id`.
    FinishStroke { id: String },
}

impl Command {
    /// Parse a raw command object. Returns `None` for anything outside the grammar.
    #[must_use]
    pub fn parse(raw: &Value) -> Option<Self> {
        match Self::deserialize(raw) {
            Ok(command) => Some(command),
            Err(err) => {
                tracing::trace!(%err, "ignoring unrecognised command");
                None
            }
        }
    }

    /// The wire discriminator for this command.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CreateRectangle { .. } => "createRectangle",
            Self::StartStroke { .. } => "startStroke",
            Self::UpdateStroke { .. } => "updateStroke",
            Self::FinishStroke { .. } => "finishStroke",
        }
    }
}
