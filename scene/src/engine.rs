use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::command::Command;
use crate::doc::GeometryStore;
use crate::pointer::PointerEvent;
use crate::presence::PresenceTracker;
use crate::snapshot::SceneSnapshot;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// The facade every engine implementation exposes to the host.
///
/// Operations are total: there is no error channel. Raw input that does not
/// parse into the grammar is dropped by [`SceneEngine::execute_raw`] and
/// [`SceneEngine::pointer_event_raw`].
pub trait SceneEngine: Send {
    /// Record the logical canvas size. Negative dimensions clamp to zero.
    fn resize(&mut self, width: i32, height: i32);

    /// Apply one typed command.
    fn execute(&mut self, command: Command);

    /// Apply one typed pointer event.
    fn pointer_event(&mut self, event: &PointerEvent);

    /// Materialize the current scene.
    fn tick(&self) -> SceneSnapshot;

    /// The last recorded logical size.
    fn viewport(&self) -> (i32, i32);

    /// Parse and apply a raw command object, ignoring anything outside the grammar.
    fn execute_raw(&mut self, raw: &Value) {
        if let Some(command) = Command::parse(raw) {
            self.execute(command);
        }
    }

    /// Parse and apply a raw pointer event object, ignoring anything outside the grammar.
    fn pointer_event_raw(&mut self, raw: &Value) {
        if let Some(event) = PointerEvent::parse(raw) {
            self.pointer_event(&event);
        }
    }
}

/// Core engine state: all logic that doesn't depend on the JS boundary.
///
/// Separated from `Engine` so it can be tested and embedded natively.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: GeometryStore,
    pub presence: PresenceTracker,
    width: i32,
    height: i32,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine and apply an initial `resize`.
    #[must_use]
    pub fn with_size(width: i32, height: i32) -> Self {
        let mut core = Self::new();
        core.resize(width, height);
        core
    }
}

impl SceneEngine for EngineCore {
    fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    fn execute(&mut self, command: Command) {
        tracing::trace!(command = command.type_name(), shapes = self.doc.len(), "applying command");
        self.doc.apply(command);
    }

    fn pointer_event(&mut self, event: &PointerEvent) {
        self.presence.apply(event);
        tracing::trace!(pointer = event.pointer_id, cursors = self.presence.len(), "pointer event applied");
    }

    fn tick(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.doc, &self.presence)
    }

    fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// The engine as exported to JavaScript. Wraps `EngineCore` and converts
/// between plain JS objects and the typed grammar.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    pub fn resize(&mut self, width: i32, height: i32) {
        self.core.resize(width, height);
    }

    /// Apply a command object. Values outside the grammar are ignored.
    pub fn execute(&mut self, command: JsValue) {
        if let Some(raw) = from_js(command) {
            self.core.execute_raw(&raw);
        }
    }

    /// Apply a pointer event object. Values outside the grammar are ignored.
    #[wasm_bindgen(js_name = pointerEvent)]
    pub fn pointer_event(&mut self, event: JsValue) {
        if let Some(raw) = from_js(event) {
            self.core.pointer_event_raw(&raw);
        }
    }

    /// Current scene as a plain JS object.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the snapshot cannot be converted to a JS value.
    pub fn tick(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.core.tick()).map_err(JsValue::from)
    }
}

/// Construct an engine sized to the host canvas.
#[wasm_bindgen(js_name = createEngine)]
#[must_use]
pub fn create_engine(width: i32, height: i32) -> Engine {
    Engine { core: EngineCore::with_size(width, height) }
}

fn from_js(value: JsValue) -> Option<Value> {
    match serde_wasm_bindgen::from_value::<Value>(value) {
        Ok(raw) => Some(raw),
        Err(err) => {
            tracing::trace!(%err, "ignoring non-object input");
            None
        }
    }
}
