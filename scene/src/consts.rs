//! Shared constants for the scene crate.

// ── Document ────────────────────────────────────────────────────

/// Identifier of the single implicit document.
pub const DOCUMENT_ID: &str = "doc-native";

/// Display name of the single implicit document.
pub const DOCUMENT_NAME: &str = "Composition native";

// ── Naming ──────────────────────────────────────────────────────

/// Prefix for generated rectangle ids (`rect-1`, `rect-2`, …).
pub const RECTANGLE_ID_PREFIX: &str = "rect-";

/// Prefix for generated rectangle names (`Rectangle 1`, …).
pub const RECTANGLE_NAME_PREFIX: &str = "Rectangle ";

/// Prefix for generated stroke names (`Trace 1`, …).
pub const STROKE_NAME_PREFIX: &str = "Trace ";

// ── Presence ────────────────────────────────────────────────────

/// Cursor colors, indexed by `|pointer_id| mod PRESENCE_PALETTE.len()`.
pub const PRESENCE_PALETTE: [&str; 6] = [
    "#22d3ee", "#f97316", "#a855f7", "#facc15", "#34d399", "#ef4444",
];

// ── Rendering ───────────────────────────────────────────────────

/// Radius of a presence dot, in CSS pixels.
pub const PRESENCE_RADIUS_PX: f64 = 5.0;
