//! Generation stepping under the standard Life transition rule.
//!
//! All functions here are pure: the next board is computed from the current
//! board only, so a partially advanced generation is never observable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Topology used when counting neighbours at the board edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Indices wrap modulo the board size (torus). A cell in row 0 treats
    /// the last row as "above", and symmetrically for columns.
    Wrap,
    /// Cells beyond the edge count as dead; edge and corner cells see fewer
    /// than 8 candidates.
    Bounded,
}

/// Live neighbours in the Moore neighbourhood of (row, col).
#[must_use]
pub fn neighbor_count(board: &Board, row: u16, col: u16, edges: EdgeMode) -> u8 {
    let size = i32::from(board.size());
    let row = i32::from(row);
    let col = i32::from(col);

    let mut count = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (r, c) = (row + dr, col + dc);
            let alive = match edges {
                EdgeMode::Wrap => {
                    board.get(r.rem_euclid(size) as u16, c.rem_euclid(size) as u16)
                }
                EdgeMode::Bounded => {
                    (0..size).contains(&r)
                        && (0..size).contains(&c)
                        && board.get(r as u16, c as u16)
                }
            };
            if alive {
                count += 1;
            }
        }
    }
    count
}

/// Conway's rule: a live cell survives on 2 or 3 neighbours, a dead cell
/// spawns on exactly 3.
#[inline]
fn next_cell_state(alive: bool, neighbours: u8) -> bool {
    if alive {
        neighbours == 2 || neighbours == 3
    } else {
        neighbours == 3
    }
}

/// Computes the next generation of `board` under the chosen edge topology.
#[must_use]
pub fn next_generation(board: &Board, edges: EdgeMode) -> Board {
    let mut next = board.cleared();
    for row in 0..board.size() {
        for col in 0..board.size() {
            let neighbours = neighbor_count(board, row, col, edges);
            if next_cell_state(board.get(row, col), neighbours) {
                next.set_raw(row, col, true);
            }
        }
    }
    next
}

/// Returns a board where each cell is independently alive with
/// `probability`, which is clamped to `[0, 1]`.
///
/// The random source is injected so callers can seed it.
#[must_use]
pub fn randomized<R: Rng + ?Sized>(board: &Board, probability: f64, rng: &mut R) -> Board {
    let p = probability.clamp(0.0, 1.0);
    let mut next = board.cleared();
    for row in 0..board.size() {
        for col in 0..board.size() {
            if rng.gen_bool(p) {
                next.set_raw(row, col, true);
            }
        }
    }
    next
}
