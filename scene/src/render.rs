//! Rendering: paints a [`SceneSnapshot`] onto an offscreen 2D canvas.
//!
//! This module is the only place that touches
//! [`web_sys::OffscreenCanvasRenderingContext2d`]. It receives snapshots and
//! produces pixels; it never reaches back into engine state. The canvas is
//! handed over once, at construction, and owned by the [`Painter`] from then
//! on.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! [`Viewport`] holds the pixel-scale math shared with native render targets.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{OffscreenCanvas, OffscreenCanvasRenderingContext2d};

use crate::consts::PRESENCE_RADIUS_PX;
use crate::snapshot::{PresenceSnapshot, SceneSnapshot, Shape, ShapePoint};

/// Logical viewport plus the factors that map it to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Device pixel ratio of the host display.
    pub dpr: f64,
    /// Host zoom factor applied to scene content.
    pub zoom: f64,
}

impl Viewport {
    /// A zero-sized viewport at the given pixel ratio and zoom 1.
    #[must_use]
    pub fn new(dpr: f64) -> Self {
        Self { width: 0.0, height: 0.0, dpr: sanitize_factor(dpr), zoom: 1.0 }
    }

    /// Apply a host resize message. Negative sizes clamp to zero; non-positive
    /// or non-finite factors fall back to 1.
    pub fn resize(&mut self, width: f64, height: f64, zoom: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.zoom = sanitize_factor(zoom);
    }

    /// Scene-unit to device-pixel scale.
    #[must_use]
    pub fn pixel_scale(&self) -> f64 {
        self.dpr * self.zoom
    }

    /// Backing store size in device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.width * self.dpr).round().clamp(0.0, f64::from(u32::MAX));
        let h = (self.height * self.dpr).round().clamp(0.0, f64::from(u32::MAX));
        (w as u32, h as u32)
    }
}

fn sanitize_factor(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 1.0 }
}

/// Immediate-mode painter bound to one offscreen canvas.
#[wasm_bindgen]
pub struct Painter {
    canvas: OffscreenCanvas,
    ctx: OffscreenCanvasRenderingContext2d,
    viewport: Viewport,
}

#[wasm_bindgen]
impl Painter {
    /// Take ownership of a transferred canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot provide a 2D context. Rendering is
    /// impossible in that case; engine state is unaffected.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: OffscreenCanvas, dpr: f64) -> Result<Painter, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable on transferred canvas"))?
            .dyn_into::<OffscreenCanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, viewport: Viewport::new(dpr) })
    }

    /// Apply a host resize: recompute the pixel scale and the backing size.
    pub fn resize(&mut self, width: f64, height: f64, zoom: f64) {
        self.viewport.resize(width, height, zoom);
        let (w, h) = self.viewport.pixel_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    /// Paint one snapshot object as returned by `Engine.tick()`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not a snapshot or a `Canvas2D` call fails.
    pub fn draw(&self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: SceneSnapshot = serde_wasm_bindgen::from_value(snapshot)?;
        draw(&self.ctx, &snapshot, &self.viewport)
    }
}

/// Draw the full scene: shapes in snapshot order, then presence dots on top.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &OffscreenCanvasRenderingContext2d,
    snapshot: &SceneSnapshot,
    viewport: &Viewport,
) -> Result<(), JsValue> {
    ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.scale(viewport.zoom, viewport.zoom)?;
    // Strokes are always solid.
    ctx.set_line_dash(&js_sys::Array::new())?;

    for shape in &snapshot.document.shapes {
        draw_shape(ctx, shape);
    }

    // Dots keep a constant on-screen size regardless of zoom.
    ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)?;
    for presence in &snapshot.presences {
        draw_presence(ctx, presence, viewport.zoom)?;
    }
    Ok(())
}

fn draw_shape(ctx: &OffscreenCanvasRenderingContext2d, shape: &Shape) {
    match shape {
        Shape::Rectangle { x, y, width, height, color, .. } => {
            ctx.set_fill_style_str(color);
            ctx.fill_rect(*x, *y, *width, *height);
        }
        Shape::Stroke { color, size, points, .. } => {
            draw_polyline(ctx, points, color, *size);
        }
    }
}

fn draw_polyline(ctx: &OffscreenCanvasRenderingContext2d, points: &[ShapePoint], color: &str, size: f64) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(size);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    if rest.is_empty() {
        // Single-point strokes still leave a round dot.
        ctx.line_to(first.x, first.y);
    }
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.stroke();
}

fn draw_presence(
    ctx: &OffscreenCanvasRenderingContext2d,
    presence: &PresenceSnapshot,
    zoom: f64,
) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(presence.x * zoom, presence.y * zoom, PRESENCE_RADIUS_PX, 0.0, TAU)?;
    ctx.set_fill_style_str(&presence.color);
    ctx.fill();
    Ok(())
}
