//! Engine context: owns the engine and its render target, runs the frame loop.
//!
//! DESIGN
//! ======
//! `spawn_worker` moves the surface into a single tokio task and hands the
//! caller only a `HostPort`. Inside the task:
//!
//! 1. select the engine (compiled or fallback) once,
//! 2. attach the surface,
//! 3. announce `engine:ready`,
//! 4. loop: apply host messages as they arrive; on every interval tick,
//!    snapshot, present, and post `scene:state`.
//!
//! The select is biased toward the interval so a host that never stops
//! sending cannot starve the frame cadence. Each frame first applies the
//! messages already queued (at most one queue's worth), so commands queued
//! before a tick are in that tick's snapshot. Missed ticks are skipped rather
//! than replayed in a burst.
//!
//! ERROR HANDLING
//! ==============
//! Nothing inside the loop is fatal. A surface that cannot attach disables
//! drawing for the life of the context; a failed present or a full outbound
//! queue costs one frame. The loop ends when the host drops its port.

use std::time::Duration;

use frames::{HostMessage, LogLevel, WorkerMessage};
use scene::SceneEngine;
use scene::render::Viewport;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::loader::{EngineLoader, select_engine};
use crate::surface::Surface;
use crate::transport::{self, HostPort, TransportError, WorkerPort};

/// What the host transfers into the engine context at spawn time.
pub struct Init {
    pub surface: Box<dyn Surface>,
    pub dpr: f64,
}

/// The host's handle on a running engine context.
pub struct WorkerHandle {
    pub port: HostPort,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Hang up and wait for the context to finish its teardown.
    pub async fn shutdown(self) {
        let Self { port, task } = self;
        drop(port);
        if let Err(e) = task.await {
            warn!(error = %e, "engine context did not exit cleanly");
        }
    }
}

/// Start an engine context on the current runtime.
pub fn spawn_worker(loader: Box<dyn EngineLoader>, init: Init, config: RuntimeConfig) -> WorkerHandle {
    let (port, worker_port) = transport::channel(config.queue_capacity);
    let task = tokio::spawn(async move {
        let selection = select_engine(loader.as_ref());
        let mut ctx = Context {
            engine: selection.engine,
            surface: Some(init.surface),
            viewport: Viewport::new(init.dpr),
            port: worker_port,
            backlog: config.queue_capacity.max(1),
        };
        if let Some(reason) = selection.fallback_reason {
            ctx.post(WorkerMessage::info(format!("using fallback engine: {reason}")));
        }
        ctx.attach_surface();
        ctx.post(WorkerMessage::Ready);
        ctx.run(Duration::from_millis(config.frame_interval_ms.max(1))).await;
        info!("engine context stopped");
    });
    WorkerHandle { port, task }
}

struct Context {
    engine: Box<dyn SceneEngine>,
    surface: Option<Box<dyn Surface>>,
    viewport: Viewport,
    port: WorkerPort,
    /// Most queued messages applied at the start of one frame.
    backlog: usize,
}

impl Context {
    fn attach_surface(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(e) = surface.attach(&self.viewport) {
            warn!(error = %e, "render target unavailable, drawing disabled");
            self.post(WorkerMessage::Log { level: LogLevel::Error, message: e.to_string() });
            self.surface = None;
        }
    }

    async fn run(&mut self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                biased;
                _ = interval.tick() => self.frame(),
                message = self.port.recv() => match message {
                    Some(message) => self.apply(message),
                    None => break,
                },
            }
        }
    }

    fn apply(&mut self, message: HostMessage) {
        match message {
            HostMessage::Resize { width, height, zoom } => {
                self.engine.resize(logical_px(width), logical_px(height));
                self.viewport.resize(width, height, zoom);
                if let Some(surface) = self.surface.as_mut() {
                    surface.resize(&self.viewport);
                }
                debug!(width, height, zoom, "viewport resized");
            }
            HostMessage::Execute(command) => self.engine.execute_raw(&command),
            HostMessage::Pointer(event) => self.engine.pointer_event_raw(&event),
        }
    }

    fn frame(&mut self) {
        for _ in 0..self.backlog {
            let Some(message) = self.port.try_recv() else {
                break;
            };
            self.apply(message);
        }
        let snapshot = self.engine.tick();
        if let Some(surface) = self.surface.as_mut()
            && let Err(e) = surface.present(&snapshot, &self.viewport)
        {
            warn!(error = %e, "frame present failed");
        }
        match serde_json::to_value(&snapshot) {
            Ok(state) => self.post(WorkerMessage::State(state)),
            Err(e) => warn!(error = %e, "snapshot serialization failed"),
        }
    }

    fn post(&mut self, message: WorkerMessage) {
        match self.port.send(message) {
            Ok(()) => {}
            Err(TransportError::Full) => debug!("host behind, dropping engine message"),
            Err(TransportError::Closed) => debug!("host gone, dropping engine message"),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn logical_px(value: f64) -> i32 {
    if value.is_finite() { value.round() as i32 } else { 0 }
}

#[cfg(test)]
#[path = "worker_test.rs"]
mod worker_test;
