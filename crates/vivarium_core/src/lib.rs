//! # Vivarium Core
//!
//! The simulation core for Vivarium - an interactive Game of Life sandbox.
//!
//! This crate contains the deterministic, I/O-free simulation logic:
//! - A square boolean board with copy-on-write update semantics
//! - Generation stepping under the standard Life rule, with a selectable
//!   edge topology (toroidal wrap or bounded)
//! - A generic bounded undo/redo history for state snapshots
//! - Strongly-typed configuration with `config.toml` overrides
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use vivarium_core::{next_generation, randomized, Board, EdgeMode, History};
//!
//! let board = Board::new(10).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let seeded = randomized(&board, 0.3, &mut rng);
//!
//! let mut history = History::new(seeded, 50);
//! history.push_with(|board| next_generation(board, EdgeMode::Wrap));
//! assert!(history.can_go_back());
//! ```

/// Square life board with copy-on-write updates
pub mod board;
/// Configuration management for sandbox parameters
pub mod config;
/// Generation stepping under the Life transition rule
pub mod engine;
/// Error types and result alias for the simulation core
pub mod error;
/// Generic bounded undo/redo history
pub mod history;

pub use board::{Board, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use config::{GridConfig, SandboxConfig, SimulationConfig, MAX_GRID_SCALE, MIN_GRID_SCALE};
pub use engine::{neighbor_count, next_generation, randomized, EdgeMode};
pub use error::{EngineError, Result};
pub use history::History;
