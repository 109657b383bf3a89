//! Sketchpad runtime: hosts a scene engine in its own task, feeds it host
//! messages over a framed channel and ticks it on a fixed cadence.
//!
//! | Module | Role |
//! |---|---|
//! | `config` | environment tuning knobs and engine mode |
//! | `fallback` | self-contained second engine behind the same facade |
//! | `loader` | one-shot engine selection with fallback |
//! | `replay` | drives a script through a running context |
//! | `script` | JSON Lines input for the headless driver |
//! | `surface` | render targets owned by the engine context |
//! | `transport` | bounded host ↔ engine channel of encoded frames |
//! | `worker` | the engine context and its frame loop |

pub mod config;
pub mod fallback;
pub mod loader;
pub mod replay;
pub mod script;
pub mod surface;
pub mod transport;
pub mod worker;
