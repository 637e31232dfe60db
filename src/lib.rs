//! Scatter plot of the sort bounds recorded in a log.
//!
//! Usage
//! -----
//!
//! Lines of the form `… single_sort_step [<low> .. <high>] …` are
//! collected, in file order, into the flat sequence
//! `low₀, high₀, low₁, high₁, …` (see [`steps`]).  This sequence is
//! then drawn against its indices with `+` markers using
//! [Matplotlib][] (see [`plot`]) and saved as `<log>.svg`.
//!
//! ```no_run
//! let values = plot_steps::scan_file("run.log")?;
//! let plotfile = plot_steps::plot_path("run.log");
//! plot_steps::render(&values, &plotfile)?;
//! # Ok::<(), plot_steps::Error>(())
//! ```
//!
//! [Matplotlib]: https://matplotlib.org/

use std::{
    ffi::OsString,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

pub mod cli;
pub mod error;
pub mod logger;
pub mod plot;
pub mod steps;

pub use error::{Error, HexError, PlotError, Result};
pub use steps::{extract_values, StepBounds, StepScanner};

/// Read the log at `path` and return its value sequence.
///
/// The file is closed when this returns, whether the scan succeeded
/// or not.
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<i128>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        Error::Open { path: path.to_path_buf(), source } })?;
    extract_values(BufReader::new(file))
}

/// Path of the plot for the log `input`: `input` with `.svg` appended.
pub fn plot_path(input: impl AsRef<Path>) -> PathBuf {
    let mut p = OsString::from(input.as_ref());
    p.push(".svg");
    PathBuf::from(p)
}

/// Draw `values` against their indices as `+` markers (no connecting
/// line) and save the figure to `path`, replacing any existing file.
/// Return the number of points drawn.
///
/// Values are plotted as `f64`, as Matplotlib would convert them.
pub fn render(values: &[i128], path: impl AsRef<Path>)
              -> std::result::Result<usize, PlotError> {
    let y: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    let (fig, mut ax) = plot::subplots()?;
    let points = ax.y(&y[..]).fmt("+").plot()?.len()?;
    fig.savefig(path)?;
    Ok(points)
}
