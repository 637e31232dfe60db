use std::{io, num::ParseIntError, path::PathBuf};
use pyo3::PyErr;
use thiserror::Error;

/// Reasons a token is not a hexadecimal literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("empty token")]
    Empty,
    #[error("invalid digit {0:?}")]
    Digit(char),
    #[error("misplaced digit separator")]
    Separator,
    /// The value does not fit in an `i128`.
    #[error(transparent)]
    Int(#[from] ParseIntError),
}

/// Possible errors of the Matplotlib backend.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The Python library "matplotlib" was not found.
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory \
             or does not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionError,
    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("read error: {0}")]
    Read(#[from] io::Error),

    #[error("line {line}: {token:?} is not a hexadecimal literal: {source}")]
    InvalidHex { line: usize, token: String, source: HexError },

    #[error(transparent)]
    Plot(#[from] PlotError),
}

pub type Result<T> = std::result::Result<T, Error>;
