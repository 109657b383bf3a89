//! Engine selection: one fallible load, decided once per worker.
//!
//! DESIGN
//! ======
//! The worker asks an `EngineLoader` for the compiled engine exactly once,
//! before its first frame. Any `LoadError` is recovered by constructing the
//! fallback engine; the error is only reported as information. Callers get a
//! `Box<dyn SceneEngine>` and never learn which variant they hold.

use scene::SceneEngine;
use tracing::info;

use crate::config::EngineMode;
use crate::fallback::FallbackEngine;

/// Why the compiled engine could not be used.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The runtime configuration asked for the fallback.
    #[error("compiled engine disabled by configuration")]
    Disabled,
    /// This build does not link the compiled engine.
    #[error("compiled engine not linked into this build")]
    NotLinked,
    /// The engine was found but could not be instantiated.
    #[error("compiled engine failed to instantiate: {0}")]
    Instantiate(String),
}

/// Produces the primary engine, or explains why it can't.
pub trait EngineLoader: Send {
    /// Load and instantiate the primary engine.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`]; the caller recovers with the fallback.
    fn load(&self) -> Result<Box<dyn SceneEngine>, LoadError>;
}

/// Loads the `scene` crate's [`scene::EngineCore`].
#[derive(Debug, Clone, Copy)]
pub struct PrimaryLoader {
    mode: EngineMode,
}

impl PrimaryLoader {
    #[must_use]
    pub fn new(mode: EngineMode) -> Self {
        Self { mode }
    }
}

impl EngineLoader for PrimaryLoader {
    fn load(&self) -> Result<Box<dyn SceneEngine>, LoadError> {
        if self.mode == EngineMode::Fallback {
            return Err(LoadError::Disabled);
        }
        load_linked()
    }
}

#[cfg(feature = "native-engine")]
fn load_linked() -> Result<Box<dyn SceneEngine>, LoadError> {
    Ok(Box::new(scene::EngineCore::new()))
}

#[cfg(not(feature = "native-engine"))]
fn load_linked() -> Result<Box<dyn SceneEngine>, LoadError> {
    Err(LoadError::NotLinked)
}

/// The engine a worker runs, plus the reason the primary was skipped, if it was.
pub struct Selection {
    pub engine: Box<dyn SceneEngine>,
    pub fallback_reason: Option<LoadError>,
}

/// Try the loader once; on failure build the fallback engine.
pub fn select_engine(loader: &dyn EngineLoader) -> Selection {
    match loader.load() {
        Ok(engine) => {
            info!("compiled engine loaded");
            Selection { engine, fallback_reason: None }
        }
        Err(err) => {
            info!(reason = %err, "compiled engine unavailable, using fallback");
            Selection { engine: Box::new(FallbackEngine::new()), fallback_reason: Some(err) }
        }
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;
