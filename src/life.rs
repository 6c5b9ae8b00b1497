//! Conway's Game of Life transition rule on a bounded grid
//!
//! Edges do not wrap: positions outside the grid count as dead.

use crate::grid::{Cell, Grid};

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Compute the next generation. The input is only read, never written.
pub fn next(grid: &Grid) -> Grid {
    let mut out = grid.clone();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let alive = grid.get(row, col).is_some_and(Cell::is_alive);
            let neighbors = count_neighbors(grid, row, col);
            let cell = if survives(alive, neighbors) { Cell::Alive } else { Cell::Dead };
            out.set(row, col, cell);
        }
    }
    out
}

#[inline]
fn survives(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Live cells among the up-to-8 in-bounds neighbors of (row, col)
#[inline]
pub fn count_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0u8;
    for (dr, dc) in OFFSETS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if grid.get(r, c).is_some_and(Cell::is_alive) {
            count += 1;
        }
    }
    count
}
