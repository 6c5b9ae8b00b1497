//! Where the starting grid comes from, plus the startup prompts that pick one

use crate::error::{LifeError, Result};
use crate::grid::{parse_row, Grid};
use rand::prelude::*;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    Random {
        rows: usize,
        cols: usize,
        seed: Option<u64>,
    },
    File(PathBuf),
    /// Rows typed on stdin, ended by an empty line
    Interactive,
}

impl GridSource {
    /// Produce the starting grid. `input`/`output` are only used by the
    /// interactive source.
    pub fn load<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<Grid> {
        let grid = match self {
            GridSource::Random { rows, cols, seed } => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(*s),
                    None => StdRng::from_entropy(),
                };
                Grid::random(*rows, *cols, &mut rng)?
            }
            GridSource::File(path) => Grid::load(path)?,
            GridSource::Interactive => read_interactive(input, output)?,
        };
        log::info!("loaded {}x{} grid from {}", grid.rows(), grid.cols(), self.describe());
        Ok(grid)
    }

    pub fn describe(&self) -> String {
        match self {
            GridSource::Random { seed: Some(s), .. } => format!("random fill (seed {})", s),
            GridSource::Random { seed: None, .. } => "random fill".to_string(),
            GridSource::File(path) => path.display().to_string(),
            GridSource::Interactive => "manual entry".to_string(),
        }
    }
}

/// Read `0`/`1` rows until an empty line or end of input.
///
/// Rows are checked as they arrive so a typo fails right away. An empty grid
/// is rejected.
pub fn read_interactive<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Grid> {
    writeln!(output, "Enter your grid row by row (0 for dead cell, 1 for live cell).")?;
    writeln!(output, "When finished, enter an empty line.")?;
    output.flush()?;

    let mut rows = Vec::new();
    let mut line_no = 0;
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        let row = parse_row(trimmed, line_no)?;
        if let Some(first) = rows.first().map(Vec::len) {
            if row.len() != first {
                return Err(LifeError::Ragged {
                    line: line_no,
                    expected: first,
                    actual: row.len(),
                });
            }
        }
        rows.push(row);
    }

    Grid::from_rows(rows)
}

/// `.txt` files directly inside `dir`, sorted by name
pub fn list_grid_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Startup menu: load from a listed file or type the grid in.
/// Every question is asked once; a bad answer is an error, not a retry.
pub fn choose_source<R: BufRead, W: Write>(input: &mut R, output: &mut W, dir: &Path) -> Result<GridSource> {
    writeln!(output, "Choose game mode:")?;
    writeln!(output, "1. Load grid from file")?;
    writeln!(output, "2. Enter grid manually")?;

    match prompt(input, output, "Enter 1 or 2: ")?.as_str() {
        "1" => {
            let files = list_grid_files(dir)?;
            if files.is_empty() {
                return Err(LifeError::NoGridFiles(dir.to_path_buf()));
            }

            writeln!(output, "Available text files:")?;
            for (i, path) in files.iter().enumerate() {
                let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                writeln!(output, "{}. {}", i + 1, name)?;
            }

            let answer = prompt(input, output, "Choose a file by number: ")?;
            let index = answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=files.len()).contains(n))
                .ok_or_else(|| LifeError::InvalidChoice(format!("no file numbered {:?}", answer)))?;
            Ok(GridSource::File(files[index - 1].clone()))
        }
        "2" => Ok(GridSource::Interactive),
        other => Err(LifeError::InvalidChoice(format!("unknown mode {:?}", other))),
    }
}
