//! Vivarium - an interactive Game of Life sandbox.
//!
//! Core layers:
//! - `vivarium_core`: deterministic simulation (board, rule, undo history)
//! - `vivarium_io`: persistence (token codec, pattern library, settings)
//! - `app`: the driver session consumed by a presentation layer

pub mod app;

pub use app::Session;
pub use vivarium_core::{Board, EdgeMode, History, SandboxConfig};
pub use vivarium_io::{JsonFileStore, KeyValueStore, MemoryStore, Pattern, PatternLibrary};
