//! [`GeoTransform`]: the affine mapping from cell space to world space.
//!
//! The core never interprets coordinates; the transform is carried from the
//! loader to the output so collaborators can georeference results.

use crate::geom::Cell;

/// Six affine coefficients in the usual `(a, b, c, d, e, f)` order:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 6]", into = "[f64; 6]"))]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GeoTransform {
    /// Cell (row, col) maps to world (col, row).
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    /// Create a transform from its six coefficients.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// World coordinates of fractional cell-space position `(col, row)`.
    #[inline]
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// World coordinates of the upper-left corner of `cell`.
    pub fn cell_origin(&self, cell: Cell) -> (f64, f64) {
        self.apply(cell.col as f64, cell.row as f64)
    }

    /// World coordinates of the centre of `cell`.
    pub fn cell_center(&self, cell: Cell) -> (f64, f64) {
        self.apply(cell.col as f64 + 0.5, cell.row as f64 + 0.5)
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }
}

impl From<GeoTransform> for [f64; 6] {
    fn from(t: GeoTransform) -> Self {
        [t.a, t.b, t.c, t.d, t.e, t.f]
    }
}
