//! Cell grid and its text format
//!
//! A grid file holds one row per line, each row a run of `0` (dead) and
//! `1` (alive) characters. Blank lines are skipped.

use crate::error::{LifeError, Result};
use rand::prelude::*;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Cell::Dead),
            '1' => Some(Cell::Alive),
            _ => None,
        }
    }
}

/// Rectangular, row-major grid. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::Shape("rows and columns must both be at least 1"));
        }
        let len = rows.checked_mul(cols).ok_or(LifeError::Shape("grid is too large"))?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Each cell is alive with probability 0.5
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Self::new(rows, cols)?;
        for cell in &mut grid.cells {
            *cell = if rng.gen_bool(0.5) { Cell::Alive } else { Cell::Dead };
        }
        Ok(grid)
    }

    /// Build from explicit rows, rejecting ragged or empty input
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let cols = match rows.first() {
            Some(first) => first.len(),
            None => return Err(LifeError::Shape("no rows were given")),
        };
        if cols == 0 {
            return Err(LifeError::Shape("rows must contain at least one cell"));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LifeError::Ragged {
                    line: i + 1,
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Parse the line-based `0`/`1` format. Line numbers in errors are 1-based
    /// and count blank lines, so they match what an editor shows.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        let mut width: Option<usize> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let row = parse_row(line, idx + 1)?;
            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(LifeError::Ragged {
                        line: idx + 1,
                        expected,
                        actual: row.len(),
                    });
                }
                Some(_) => {}
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| LifeError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col); `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = cell;
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }
}

/// Parse one trimmed, non-empty row
pub fn parse_row(line: &str, line_no: usize) -> Result<Vec<Cell>> {
    line.chars()
        .enumerate()
        .map(|(col, ch)| {
            Cell::from_digit(ch).ok_or(LifeError::Format {
                line: line_no,
                column: col + 1,
                found: ch,
            })
        })
        .collect()
}

/// Writes the grid back out in its file format
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                f.write_str(if cell.is_alive() { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
