//! Presence tracker: last known position and color of every pointer seen.
//!
//! Entries are created on the first `pointerMove` for a pointer id and then
//! only moved. Nothing removes an entry; no "pointer left" signal reaches the
//! engine, so the map grows with the number of distinct pointer ids for the
//! life of the engine.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::PRESENCE_PALETTE;
use crate::pointer::{PointerEvent, PointerKind};

/// Cursor state for one pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    /// The pointer id rendered as a decimal string.
    pub id: String,
    /// Palette color, fixed at creation.
    pub color: String,
    pub x: f64,
    pub y: f64,
}

/// Palette color for a pointer id. Ids congruent mod the palette size share a color.
#[must_use]
pub fn color_for(pointer_id: i64) -> &'static str {
    let len = PRESENCE_PALETTE.len() as u64;
    // Remainder is below the palette length, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation)]
    let slot = (pointer_id.unsigned_abs() % len) as usize;
    PRESENCE_PALETTE[slot]
}

/// Mapping from pointer id to its presence entry.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    entries: HashMap<i64, Presence>,
}

impl PresenceTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pointer event. Only `pointerMove` changes state.
    pub fn apply(&mut self, event: &PointerEvent) {
        if event.kind == PointerKind::Move {
            self.move_pointer(event.pointer_id, event.x, event.y);
        }
    }

    /// Insert or move the presence for `pointer_id`. The color is never reassigned.
    pub fn move_pointer(&mut self, pointer_id: i64, x: f64, y: f64) {
        self.entries
            .entry(pointer_id)
            .and_modify(|presence| {
                presence.x = x;
                presence.y = y;
            })
            .or_insert_with(|| Presence {
                id: pointer_id.to_string(),
                color: color_for(pointer_id).to_owned(),
                x,
                y,
            });
    }

    /// Look up a presence by pointer id.
    #[must_use]
    pub fn get(&self, pointer_id: i64) -> Option<&Presence> {
        self.entries.get(&pointer_id)
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Presence> {
        self.entries.values()
    }

    /// Number of tracked pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pointer has moved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
