//! Scene engine for the sketchpad drawing surface.
//!
//! This crate owns all drawable geometry and pointer presence for a single
//! implicit document. It is compiled both as a native library (used by the
//! host runtime) and to WebAssembly (exported through [`engine::Engine`] and
//! [`render::Painter`]). Mutation happens only through the typed command and
//! pointer grammars; state becomes observable only through
//! [`snapshot::SceneSnapshot`] values produced by `tick`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `SceneEngine` facade trait, [`engine::EngineCore`], wasm `Engine` |
//! | [`doc`] | Geometry store: rectangles, strokes, active-stroke index |
//! | [`presence`] | Pointer presence tracker and palette lookup |
//! | [`command`] | Command grammar and its parse step |
//! | [`pointer`] | Pointer event grammar and its parse step |
//! | [`snapshot`] | Wire snapshot types and the serializer |
//! | [`render`] | Canvas 2D painter used by the browser worker |
//! | [`consts`] | Document identity, palette, naming prefixes |

pub mod command;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod pointer;
pub mod presence;
pub mod render;
pub mod snapshot;

pub use command::Command;
pub use engine::{EngineCore, SceneEngine};
pub use pointer::{PointerEvent, PointerKind};
pub use snapshot::{DocumentSnapshot, PresenceSnapshot, SceneSnapshot, Shape, ShapePoint};
