//! Sparse board encoding and the shareable text token format.
//!
//! A token is base64 (standard alphabet, padded) over the UTF-8 bytes of
//! the JSON object `{"cells":[[row,col],...],"size":N}`. This chain is the
//! only bit-exact wire format in the system; tokens exported by earlier
//! builds must keep importing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use vivarium_core::{Board, MAX_GRID_SIZE, MIN_GRID_SIZE};

use crate::error::{ImportError, Result};

/// All live cells of a board, `[row, col]` in row-major scan order.
pub type CellList = Vec<[u16; 2]>;

/// A board reduced to its live cells plus the side length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub cells: CellList,
    pub size: u16,
}

impl SavedState {
    /// Captures the live cells of `board` in scan order.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            cells: encode(board),
            size: board.size(),
        }
    }

    /// Rebuilds the full board. Inverse of [`SavedState::from_board`].
    ///
    /// # Errors
    /// Fails if the size or any listed cell is out of range. The validated
    /// import path screens both; hitting this from a stored pattern means
    /// the stored data was corrupted.
    pub fn to_board(&self) -> Result<Board> {
        let mut board = Board::new(self.size)?;
        for &[row, col] in &self.cells {
            board.set(row, col, true)?;
        }
        Ok(board)
    }
}

/// Lists the live cells of `board` in row-major scan order.
#[must_use]
pub fn encode(board: &Board) -> CellList {
    board.live_cells().map(|(row, col)| [row, col]).collect()
}

/// Serializes `state` into a copy-pasteable text token.
pub fn export_token(state: &SavedState) -> Result<String> {
    let json = serde_json::to_string(state)?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Parses and validates a text token.
///
/// All-or-nothing: any failure (malformed base64, bad UTF-8, wrong JSON
/// shape, out-of-range size or cell) rejects the whole token.
pub fn import_token(token: &str) -> std::result::Result<SavedState, ImportError> {
    let bytes = BASE64.decode(token.trim())?;
    let json = String::from_utf8(bytes)?;
    let state: SavedState = serde_json::from_str(&json)?;
    validate(&state)?;
    Ok(state)
}

/// Checks whether a string parses as a valid token.
#[must_use]
pub fn is_valid_token(token: &str) -> bool {
    import_token(token).is_ok()
}

fn validate(state: &SavedState) -> std::result::Result<(), ImportError> {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&state.size) {
        return Err(ImportError::SizeOutOfRange {
            size: state.size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        });
    }
    for &[row, col] in &state.cells {
        if row >= state.size || col >= state.size {
            return Err(ImportError::CellOutOfRange {
                row,
                col,
                size: state.size,
            });
        }
    }
    Ok(())
}
