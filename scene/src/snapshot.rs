//! Scene snapshots: the read-only view of engine state handed out by `tick`.
//!
//! A snapshot is fully materialized on every call. There is no diffing: each
//! stroke carries its complete point list whether it is finished or not.
//! `document.shapes` order is part of the contract (rectangles in creation
//! order, then strokes in creation order); `presences` order is not.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DOCUMENT_ID, DOCUMENT_NAME};
use crate::doc::{GeometryStore, Rectangle, Stroke, StrokePoint};
use crate::presence::{Presence, PresenceTracker};

/// A point on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub x: f64,
    pub y: f64,
}

/// A drawable shape, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rectangle {
        id: String,
        name: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Stroke {
        id: String,
        name: String,
        color: String,
        size: f64,
        points: Vec<ShapePoint>,
    },
}

impl Shape {
    /// The shape's id (engine-generated for rectangles, caller-supplied for strokes).
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Rectangle { id, .. } | Self::Stroke { id, .. } => id,
        }
    }

    /// The shape's generated display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rectangle { name, .. } | Self::Stroke { name, .. } => name,
        }
    }
}

impl From<&Rectangle> for Shape {
    fn from(rect: &Rectangle) -> Self {
        Self::Rectangle {
            id: rect.id.clone(),
            name: rect.name.clone(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: rect.color.clone(),
        }
    }
}

impl From<&Stroke> for Shape {
    fn from(stroke: &Stroke) -> Self {
        Self::Stroke {
            id: stroke.id.clone(),
            name: stroke.name.clone(),
            color: stroke.color.clone(),
            size: stroke.size,
            points: stroke.points.iter().map(|&StrokePoint { x, y }| ShapePoint { x, y }).collect(),
        }
    }
}

/// A pointer cursor on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub id: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

impl From<&Presence> for PresenceSnapshot {
    fn from(presence: &Presence) -> Self {
        Self {
            id: presence.id.clone(),
            color: presence.color.clone(),
            x: presence.x,
            y: presence.y,
        }
    }
}

/// The single implicit document and its shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub id: String,
    pub name: String,
    pub shapes: Vec<Shape>,
}

impl DocumentSnapshot {
    /// A document with the fixed engine identity and the given shapes.
    #[must_use]
    pub fn with_shapes(shapes: Vec<Shape>) -> Self {
        Self { id: DOCUMENT_ID.to_owned(), name: DOCUMENT_NAME.to_owned(), shapes }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub document: DocumentSnapshot,
    pub presences: Vec<PresenceSnapshot>,
}

impl SceneSnapshot {
    /// Serialize the store and tracker. Pure; the same state always yields the same document.
    #[must_use]
    pub fn capture(store: &GeometryStore, presence: &PresenceTracker) -> Self {
        let mut shapes = Vec::with_capacity(store.len());
        shapes.extend(store.rectangles().iter().map(Shape::from));
        shapes.extend(store.strokes().iter().map(Shape::from));

        Self {
            document: DocumentSnapshot::with_shapes(shapes),
            presences: presence.iter().map(PresenceSnapshot::from).collect(),
        }
    }

    /// Find a presence by its string id.
    #[cfg(test)]
    #[must_use]
    pub fn presence(&self, id: &str) -> Option<&PresenceSnapshot> {
        self.presences.iter().find(|p| p.id == id)
    }

    /// Find a shape by its generated name.
    #[cfg(test)]
    #[must_use]
    pub fn shape_named(&self, name: &str) -> Option<&Shape> {
        self.document.shapes.iter().find(|s| s.name() == name)
    }
}
