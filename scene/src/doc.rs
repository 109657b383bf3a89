//! Document model: rectangles, strokes, and the geometry store that owns them.
//!
//! The store keeps two append-only collections. Rectangles are immutable once
//! created. Strokes grow point by point while their caller-supplied id is
//! present in the active-stroke index; `finishStroke` removes the index entry
//! but never the stroke, so every stroke ever started stays in the scene.
//!
//! Data flows into this layer only through [`GeometryStore::apply`]. The
//! snapshot serializer reads the collections in creation order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::consts::{RECTANGLE_ID_PREFIX, RECTANGLE_NAME_PREFIX, STROKE_NAME_PREFIX};

/// An axis-aligned rectangle as created by `createRectangle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Engine-generated id, `rect-N`.
    pub id: String,
    /// Engine-generated display name, `Rectangle N`.
    pub name: String,
    /// Left edge in scene coordinates.
    pub x: f64,
    /// Top edge in scene coordinates.
    pub y: f64,
    /// Width; not validated, may be zero or negative.
    pub width: f64,
    /// Height; not validated, may be zero or negative.
    pub height: f64,
    /// CSS color string, passed through untouched.
    pub color: String,
}

/// One sampled point of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
}

/// A freehand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Caller-supplied id.
    pub id: String,
    /// Engine-generated display name, `Trace N`.
    pub name: String,
    /// CSS color string.
    pub color: String,
    /// Line width in scene units.
    pub size: f64,
    /// Points in the order they were received. Never empty.
    pub points: Vec<StrokePoint>,
}

/// In-memory owner of all scene geometry.
#[derive(Debug, Default)]
pub struct GeometryStore {
    rectangles: Vec<Rectangle>,
    strokes: Vec<Stroke>,
    /// In-progress stroke id -> position in `strokes`.
    active: HashMap<String, usize>,
    /// Rectangles ever created; source of the `rect-N` ordinal.
    rectangle_count: usize,
    /// Strokes ever started; source of the `Trace N` ordinal.
    stroke_count: usize,
}

impl GeometryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one command. Never fails; references to inactive strokes are no-ops.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::CreateRectangle { x, y, width, height, color } => {
                self.create_rectangle(x, y, width, height, color);
            }
            Command::StartStroke { id, x, y, size, color } => {
                self.start_stroke(id, x, y, size, color);
            }
            Command::UpdateStroke { id, x, y } => {
                self.update_stroke(&id, x, y);
            }
            Command::FinishStroke { id } => {
                self.finish_stroke(&id);
            }
        }
    }

    /// Append a rectangle whose id and name derive from the rectangle counter.
    pub fn create_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, color: String) -> &Rectangle {
        self.rectangle_count += 1;
        let n = self.rectangle_count;
        let index = self.rectangles.len();
        self.rectangles.push(Rectangle {
            id: format!("{RECTANGLE_ID_PREFIX}{n}"),
            name: format!("{RECTANGLE_NAME_PREFIX}{n}"),
            x,
            y,
            width,
            height,
            color,
        });
        &self.rectangles[index]
    }

    /// Open a stroke and point the active index for `id` at it.
    ///
    /// If `id` is already active the index entry is overwritten: the earlier
    /// stroke keeps the points it already has and stays in the scene, but no
    /// longer receives updates.
    pub fn start_stroke(&mut self, id: String, x: f64, y: f64, size: f64, color: String) {
        self.stroke_count += 1;
        let index = self.strokes.len();
        self.strokes.push(Stroke {
            id: id.clone(),
            name: format!("{STROKE_NAME_PREFIX}{}", self.stroke_count),
            color,
            size,
            points: vec![StrokePoint { x, y }],
        });
        self.active.insert(id, index);
    }

    /// Append a point to the active stroke `id`. Returns false if `id` is not active.
    pub fn update_stroke(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(&index) = self.active.get(id) else {
            return false;
        };
        let Some(stroke) = self.strokes.get_mut(index) else {
            return false;
        };
        stroke.points.push(StrokePoint { x, y });
        true
    }

    /// Drop `id` from the active index. The stroke itself is kept.
    pub fn finish_stroke(&mut self, id: &str) -> bool {
        self.active.remove(id).is_some()
    }

    /// Whether `id` currently accepts `updateStroke` points.
    #[cfg(test)]
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    /// All rectangles in creation order.
    #[must_use]
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// All strokes in creation order, finished or not.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Rectangles and strokes created so far, as `(rectangles, strokes)`.
    #[cfg(test)]
    #[must_use]
    pub fn counters(&self) -> (usize, usize) {
        (self.rectangle_count, self.stroke_count)
    }

    /// Number of strokes still accepting points.
    #[cfg(test)]
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Total number of shapes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rectangles.len() + self.strokes.len()
    }

    /// Returns `true` if the scene contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty() && self.strokes.is_empty()
    }
}
