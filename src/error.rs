use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run before or during the simulation
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cannot read grid file {}: {}", .path.display(), .source)]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}, column {column}: expected '0' or '1', found {found:?}")]
    Format {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line {line}: row has {actual} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("grid is empty: {0}")]
    Shape(&'static str),

    #[error("terminal mode error: {0}")]
    Terminal(#[source] io::Error),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("no .txt grid files found in {}", .0.display())]
    NoGridFiles(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
