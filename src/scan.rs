//! Incremental win detection through the cell that was just played.
//!
//! The scan only ever runs once per push: it takes the owner's per-column
//! occupancy bitmaps and walks outward from the placed cell in both senses
//! of each axis direction, so its cost is bounded by the board dimensions
//! regardless of how the position was reached.

use crate::board::Board;
use crate::{HEIGHT, WIDTH};

// vertical, horizontal, diagonal down, diagonal up
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, -1), (1, 1)];

/// Does the token at (`column`, `row`) complete a run of four?
pub(crate) fn connects_four(board: &Board, column: usize, row: usize) -> bool {
    let Some(owner) = board.cell(column, row) else {
        return false;
    };
    let bitmaps = board.side_bitmaps(owner);
    DIRECTIONS
        .iter()
        .any(|&direction| run_length(&bitmaps, column, row, direction) >= 4)
}

/// Length of the longest run of like tokens through (`column`, `row`)
/// along one direction axis, counting the placed cell itself.
fn run_length(
    bitmaps: &[u8; WIDTH],
    column: usize,
    row: usize,
    (column_step, row_step): (i32, i32),
) -> usize {
    let occupied = |offset: i32| -> bool {
        let column = column as i32 + offset * column_step;
        let row = row as i32 + offset * row_step;
        if column < 0 || column >= WIDTH as i32 || row < 0 || row >= HEIGHT as i32 {
            return false;
        }
        bitmaps[column as usize] & (1 << row) != 0
    };

    let mut length = 1;
    let mut offset = 1;
    while occupied(offset) {
        length += 1;
        offset += 1;
    }
    offset = -1;
    while occupied(offset) {
        length += 1;
        offset -= 1;
    }
    length
}
