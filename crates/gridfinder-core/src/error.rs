//! The [`GridError`] type shared by every gridfinder crate.

use std::fmt;

use crate::geom::{Cell, Shape};

/// Why a start cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartProblem {
    /// The cell lies outside the grid.
    OutOfBounds,
    /// The cell is inside the grid but is not a target.
    NotATarget,
}

/// Errors raised while preparing or propagating over a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The target mask contains no target cell.
    EmptyTargetSet,
    /// Two rasters that must be aligned have different shapes.
    ShapeMismatch { expected: Shape, found: Shape },
    /// The propagation start cell is unusable.
    InvalidStart { cell: Cell, problem: StartProblem },
    /// A cost reached during relaxation is negative or NaN.
    NonFiniteCost { cell: Cell, value: f64 },
    /// Rows passed to a raster constructor have different lengths.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Raw data length does not match the declared shape.
    DataLength { shape: Shape, found: usize },
    /// A target-mask value other than 0, 1 or NaN.
    InvalidTargetValue { cell: Cell, value: f64 },
    /// A down-sampling block size of zero.
    InvalidScale(usize),
    /// A NaN unusable-cost barrier, which no cost could ever reach.
    InvalidBarrier(f64),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTargetSet => write!(f, "target mask contains no target cell"),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected}, found {found}")
            }
            Self::InvalidStart { cell, problem } => match problem {
                StartProblem::OutOfBounds => write!(f, "start cell {cell} is out of bounds"),
                StartProblem::NotATarget => write!(f, "start cell {cell} is not a target"),
            },
            Self::NonFiniteCost { cell, value } => {
                write!(f, "invalid cost {value} at {cell}: costs must be non-negative")
            }
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "ragged raster: row {row} has {found} columns, expected {expected}"
            ),
            Self::DataLength { shape, found } => write!(
                f,
                "raster data has {found} values, shape {shape} needs {}",
                shape.len()
            ),
            Self::InvalidTargetValue { cell, value } => {
                write!(f, "target mask value {value} at {cell} is neither 0 nor 1")
            }
            Self::InvalidScale(scale) => write!(f, "invalid down-sampling block size {scale}"),
            Self::InvalidBarrier(value) => {
                write!(f, "invalid barrier {value}: must be a number or inf")
            }
        }
    }
}

impl std::error::Error for GridError {}
