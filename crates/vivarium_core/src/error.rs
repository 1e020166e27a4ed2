//! Error types for the simulation core.

use thiserror::Error;

use crate::board::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Errors raised by board construction and cell addressing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Requested board side length lies outside the policy bounds.
    #[error("grid size {size} outside allowed range {min}..={max}")]
    InvalidSize { size: u16, min: u16, max: u16 },

    /// A coordinate addressed a cell beyond the board edge. Reaching this
    /// from a correctly constrained caller is a bug, not a user error.
    #[error("cell ({row}, {col}) out of bounds for a {size}x{size} board")]
    OutOfBounds { row: u16, col: u16, size: u16 },
}

/// Result type alias for simulation core operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    #[must_use]
    pub fn invalid_size(size: u16) -> Self {
        Self::InvalidSize {
            size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        }
    }

    #[must_use]
    pub fn out_of_bounds(row: u16, col: u16, size: u16) -> Self {
        Self::OutOfBounds { row, col, size }
    }
}
