//! Minimal binding to the [Matplotlib][] Python visualization library.
//!
//! Figures are explicit objects created from `matplotlib.figure`;
//! pyplot and its implicit "current figure" are never involved.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use lazy_static::lazy_static;
use pyo3::{
    prelude::*,
    intern,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyList,
};
use numpy::PyArray1;
use tracing::info;
use crate::error::PlotError;

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(Bound::unbind))
}}

lazy_static! {
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| PlotError::NoMatplotlib)
}}

/// Trait expressing that `Self` can be handed to Matplotlib as a
/// `numpy.ndarray`.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny>;
}

impl Data for [f64] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny> {
        PyArray1::from_slice_bound(py, self).into_any()
    }
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

/// Lines added to an [`Axes`] by one call to `plot`.
#[derive(Debug)]
pub struct Line2D {
    line2d: Py<PyList>,
}

impl Figure {
    /// Return a new `Figure`.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new() -> Result<Figure, PlotError> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| {
            let fig = figure.bind(py)
                .getattr(intern!(py, "Figure"))?
                .call0()?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Add a single set of axes covering the figure.
    pub fn subplots(&self) -> Result<Axes, PlotError> {
        Python::with_gil(|py| {
            let ax = self.fig.call_method0(py, intern!(py, "subplots"))?;
            Ok(Axes { ax })
        })
    }

    /// Save the figure to `path`.  The image format is deduced from
    /// the extension of `path`; an existing file is overwritten.
    pub fn savefig(&self, path: impl AsRef<Path>) -> Result<(), PlotError> {
        let path = path.as_ref();
        Python::with_gil(|py| {
            self.fig.call_method1(py, intern!(py, "savefig"), (path,))
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        PlotError::FileNotFoundError
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        PlotError::PermissionError
                    } else {
                        PlotError::Python(e)
                    }
                })
        })?;
        info!(path = %path.display(), "figure saved");
        Ok(())
    }
}

/// Return a new figure together with its (unique) axes.
pub fn subplots() -> Result<(Figure, Axes), PlotError> {
    let fig = Figure::new()?;
    let ax = fig.subplots()?;
    Ok((fig, ax))
}

impl Axes {
    /// Plot `y` versus its indices as lines and/or markers.
    ///
    /// The mutable borrow reflects that the final `.plot()` mutates
    /// the underlying Python object.
    #[must_use]
    pub fn y<'a, D>(&'a mut self, y: &'a D) -> Y<'a, D>
    where D: Data + ?Sized {
        Y { axes: self, fmt: "", data: y }
    }
}

pub struct Y<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    fmt: &'a str,
    data: &'a D,
}

impl<'a, D> Y<'a, D>
where D: Data + ?Sized {
    /// Set the Matplotlib format string, e.g. `"+"` for markers
    /// without connecting line.
    #[must_use]
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.fmt = fmt;
        self
    }

    /// Plot the data with the options specified in [`Y`].
    pub fn plot(self) -> Result<Line2D, PlotError> {
        Python::with_gil(|py| {
            let yn = self.data.to_numpy(py);
            let lines = self.axes.ax.bind(py)
                .call_method1(intern!(py, "plot"), (yn, self.fmt))?
                .downcast_into::<PyList>()
                .map_err(PyErr::from)?;
            Ok(Line2D { line2d: lines.unbind() })
        })
    }
}

impl Line2D {
    /// Number of data points carried by the lines.
    pub fn len(&self) -> Result<usize, PlotError> {
        Python::with_gil(|py| {
            let mut n = 0;
            for l in self.line2d.bind(py).iter() {
                n += l.call_method0(intern!(py, "get_xdata"))?.len()?;
            }
            Ok(n)
        })
    }

    pub fn is_empty(&self) -> Result<bool, PlotError> {
        Ok(self.len()? == 0)
    }
}
