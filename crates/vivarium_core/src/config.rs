//! Configuration for a single sandbox instance.
//!
//! Maps to a `config.toml` file. Configuration hierarchy:
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [grid]
//! size = 12
//! scale = 1.5
//!
//! [simulation]
//! wrap_edges = false
//! randomize_chance = 0.25
//! tick_interval_ms = 100
//! history_capacity = 50
//! ```
//!
//! Each sandbox instance carries its own config; there is no ambient
//! module-level state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Smallest permitted display scale.
pub const MIN_GRID_SCALE: f64 = 0.5;
/// Largest permitted display scale.
pub const MAX_GRID_SCALE: f64 = 5.0;

/// Board dimensions and display scale.
///
/// `scale` has no effect on the simulation itself; it is persisted on
/// behalf of the presentation layer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridConfig {
    pub size: u16,
    pub scale: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            scale: 1.0,
        }
    }
}

/// Stepping behaviour and history bounds.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    /// Toroidal neighbour topology when true, bounded edges otherwise.
    pub wrap_edges: bool,
    /// Probability a cell comes up alive when the board is randomized.
    pub randomize_chance: f64,
    /// Interval the driving loop waits between generations.
    pub tick_interval_ms: u64,
    /// Undo/redo depth for board snapshots.
    pub history_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            wrap_edges: true,
            randomize_chance: 0.3,
            tick_interval_ms: 250,
            history_capacity: 50,
        }
    }
}

/// Top-level configuration, one per sandbox instance.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SandboxConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl SandboxConfig {
    /// Checks every field against policy bounds.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid.size),
            "Grid size must lie in {}..={}",
            MIN_GRID_SIZE,
            MAX_GRID_SIZE
        );
        anyhow::ensure!(
            (MIN_GRID_SCALE..=MAX_GRID_SCALE).contains(&self.grid.scale),
            "Grid scale must lie in {}..={}",
            MIN_GRID_SCALE,
            MAX_GRID_SCALE
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.simulation.randomize_chance),
            "Randomize chance must be a probability in 0..=1"
        );
        anyhow::ensure!(
            self.simulation.tick_interval_ms > 0,
            "Tick interval must be positive"
        );
        anyhow::ensure!(
            self.simulation.history_capacity >= 1,
            "History must hold at least one entry"
        );
        Ok(())
    }

    /// Loads and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file is missing.
    /// A present-but-invalid file is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}
