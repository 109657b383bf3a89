//! Runtime configuration.
//!
//! DESIGN
//! ======
//! Tuning knobs for the engine context are read from environment variables
//! with typed defaults, so a missing or unparsable value never stops the
//! runtime. Driver options (script, viewport, engine choice) come from the
//! command line in `main`.

use tracing::info;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Which engine the worker should try to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EngineMode {
    /// Load the compiled engine, falling back if it cannot be instantiated.
    #[default]
    Auto,
    /// Skip the compiled engine and run the fallback directly.
    Fallback,
}

/// Tuning knobs for the engine context, loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Period of the frame loop in milliseconds.
    pub frame_interval_ms: u64,
    /// Capacity of each direction of the host ↔ engine channel.
    pub queue_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS, queue_capacity: DEFAULT_QUEUE_CAPACITY }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self {
            frame_interval_ms: env_parse("SKETCHPAD_FRAME_INTERVAL_MS", DEFAULT_FRAME_INTERVAL_MS).max(1),
            queue_capacity: env_parse("SKETCHPAD_QUEUE_CAPACITY", DEFAULT_QUEUE_CAPACITY).max(1),
        };
        info!(
            frame_interval_ms = config.frame_interval_ms,
            queue_capacity = config.queue_capacity,
            "runtime configured"
        );
        config
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
