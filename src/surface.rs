//! Render targets owned by the engine context.
//!
//! DESIGN
//! ======
//! A `Surface` is handed to the worker by value at spawn time and never
//! comes back: the host keeps no handle to it. The worker attaches it once
//! (a surface that cannot attach disables rendering but not the engine),
//! resizes it on viewport changes, and presents one snapshot per frame.
//!
//! ERROR HANDLING
//! ==============
//! `present` failures are per-frame: the worker logs them and presents the
//! next frame as usual. Only `attach` failures are permanent.

use scene::SceneSnapshot;
use scene::render::Viewport;
use tracing::trace;

/// Errors raised by a render target.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The target cannot provide the drawing capability the worker needs.
    #[error("render target unavailable: {0}")]
    Unavailable(String),
    /// A single frame could not be drawn.
    #[error("frame draw failed: {0}")]
    Draw(String),
}

/// Something a snapshot can be painted onto.
pub trait Surface: Send + 'static {
    /// Claim the drawing capability. Called once, before the first frame.
    ///
    /// # Errors
    ///
    /// [`RenderError::Unavailable`] when the target cannot be drawn to at all.
    fn attach(&mut self, viewport: &Viewport) -> Result<(), RenderError>;

    /// Match the backing store to a new viewport.
    fn resize(&mut self, viewport: &Viewport);

    /// Paint one frame.
    ///
    /// # Errors
    ///
    /// [`RenderError::Draw`] when this frame could not be drawn.
    fn present(&mut self, snapshot: &SceneSnapshot, viewport: &Viewport) -> Result<(), RenderError>;
}

/// A surface with no pixels: tracks backing size and frame statistics.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pixel_size: (u32, u32),
    frames: u64,
    last_shape_count: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing store size in device pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Shape count of the most recent frame.
    #[must_use]
    pub fn last_shape_count(&self) -> usize {
        self.last_shape_count
    }
}

impl Surface for HeadlessSurface {
    fn attach(&mut self, viewport: &Viewport) -> Result<(), RenderError> {
        self.pixel_size = viewport.pixel_size();
        Ok(())
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.pixel_size = viewport.pixel_size();
    }

    fn present(&mut self, snapshot: &SceneSnapshot, viewport: &Viewport) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_shape_count = snapshot.document.shapes.len();
        trace!(
            frame = self.frames,
            shapes = self.last_shape_count,
            presences = snapshot.presences.len(),
            scale = viewport.pixel_scale(),
            "headless frame"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;
