//! Fallback engine: runs when the compiled engine cannot be loaded.
//!
//! DESIGN
//! ======
//! A second, self-contained implementation of the `SceneEngine` facade. It
//! keeps shapes directly in their wire form, so `tick` is a clone of two
//! vectors and a map walk. It shares only the contract with the primary
//! engine (grammar, snapshot types, palette); none of its storage or naming
//! code. Callers must not be able to tell the two apart.

use std::collections::{BTreeMap, HashMap};

use scene::consts::{DOCUMENT_ID, DOCUMENT_NAME, PRESENCE_PALETTE};
use scene::{
    Command, DocumentSnapshot, PointerEvent, PointerKind, PresenceSnapshot, SceneEngine, SceneSnapshot, Shape,
    ShapePoint,
};
use tracing::trace;

#[derive(Debug, Default)]
pub struct FallbackEngine {
    width: i32,
    height: i32,
    rectangles: Vec<Shape>,
    strokes: Vec<Shape>,
    open_strokes: HashMap<String, usize>,
    cursors: BTreeMap<i64, PresenceSnapshot>,
}

impl FallbackEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cursor_color(pointer_id: i64) -> &'static str {
        let len = PRESENCE_PALETTE.len() as u64;
        let slot = pointer_id.unsigned_abs() % len;
        PRESENCE_PALETTE[usize::try_from(slot).unwrap_or_default()]
    }
}

impl SceneEngine for FallbackEngine {
    fn resize(&mut self, width: i32, height: i32) {
        self.width = if width < 0 { 0 } else { width };
        self.height = if height < 0 { 0 } else { height };
    }

    fn execute(&mut self, command: Command) {
        trace!(command = command.type_name(), "applying command");
        match command {
            Command::CreateRectangle { x, y, width, height, color } => {
                let ordinal = self.rectangles.len() + 1;
                self.rectangles.push(Shape::Rectangle {
                    id: format!("rect-{ordinal}"),
                    name: format!("Rectangle {ordinal}"),
                    x,
                    y,
                    width,
                    height,
                    color,
                });
            }
            Command::StartStroke { id, x, y, size, color } => {
                let slot = self.strokes.len();
                self.open_strokes.insert(id.clone(), slot);
                self.strokes.push(Shape::Stroke {
                    id,
                    name: format!("Trace {}", slot + 1),
                    color,
                    size,
                    points: vec![ShapePoint { x, y }],
                });
            }
            Command::UpdateStroke { id, x, y } => {
                let Some(&slot) = self.open_strokes.get(&id) else {
                    return;
                };
                if let Some(Shape::Stroke { points, .. }) = self.strokes.get_mut(slot) {
                    points.push(ShapePoint { x, y });
                }
            }
            Command::FinishStroke { id } => {
                self.open_strokes.remove(&id);
            }
        }
    }

    fn pointer_event(&mut self, event: &PointerEvent) {
        if event.kind != PointerKind::Move {
            return;
        }
        let cursor = self.cursors.entry(event.pointer_id).or_insert_with(|| PresenceSnapshot {
            id: event.pointer_id.to_string(),
            color: Self::cursor_color(event.pointer_id).to_owned(),
            x: event.x,
            y: event.y,
        });
        cursor.x = event.x;
        cursor.y = event.y;
    }

    fn tick(&self) -> SceneSnapshot {
        let shapes = self.rectangles.iter().chain(&self.strokes).cloned().collect();
        SceneSnapshot {
            document: DocumentSnapshot {
                id: DOCUMENT_ID.to_owned(),
                name: DOCUMENT_NAME.to_owned(),
                shapes,
            },
            presences: self.cursors.values().cloned().collect(),
        }
    }

    fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
#[path = "fallback_test.rs"]
mod fallback_test;
