//! Geometry primitives: [`Cell`] and [`Shape`].
//!
//! A [`Cell`] addresses one raster cell by `(row, col)`. A [`Shape`] is the
//! `(rows, cols)` extent of a raster anchored at the origin; it converts
//! between cells and row-major flat indices.

use std::fmt;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A raster cell coordinate. Rows grow downwards, columns grow right.
///
/// Cells order lexicographically by `(row, col)`, which is also row-major
/// scan order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by `(dr, dc)`.
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// All eight neighbours in scan order: row delta -1, 0, +1 (outer) and
    /// column delta -1, 0, +1 (inner), skipping the cell itself.
    ///
    /// The order is part of the propagation contract; do not reorder.
    #[inline]
    pub fn neighbors_8(self) -> [Cell; 8] {
        [
            self.shift(-1, -1),
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
        ]
    }

    /// Whether `other` differs from `self` on both axes.
    #[inline]
    pub fn is_diagonal_to(self, other: Cell) -> bool {
        self.row != other.row && self.col != other.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// The extent of a raster: `rows × cols` cells starting at (0, 0).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Create a new shape.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the shape has zero area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the shape.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.col >= 0 && (c.row as usize) < self.rows && (c.col as usize) < self.cols
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols + c.col as usize)
    }

    /// Cell at a row-major flat index. The index must be `< len()`.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        Cell::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> ShapeIter {
        ShapeIter {
            shape: self,
            next: 0,
        }
    }
}

impl IntoIterator for Shape {
    type Item = Cell;
    type IntoIter = ShapeIter;
    #[inline]
    fn into_iter(self) -> ShapeIter {
        self.iter()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// ShapeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the cells of a [`Shape`].
#[derive(Clone, Debug)]
pub struct ShapeIter {
    shape: Shape,
    next: usize,
}

impl Iterator for ShapeIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.shape.len() {
            return None;
        }
        let c = self.shape.cell(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ShapeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn neighbors_scan_order() {
        let n = Cell::new(5, 5).neighbors_8();
        assert_eq!(n[0], Cell::new(4, 4));
        assert_eq!(n[3], Cell::new(5, 4));
        assert_eq!(n[4], Cell::new(5, 6));
        assert_eq!(n[7], Cell::new(6, 6));
        assert!(!n.contains(&Cell::new(5, 5)));
    }

    #[test]
    fn diagonal_detection() {
        let c = Cell::new(2, 2);
        assert!(c.is_diagonal_to(Cell::new(1, 1)));
        assert!(c.is_diagonal_to(Cell::new(3, 1)));
        assert!(!c.is_diagonal_to(Cell::new(2, 3)));
        assert!(!c.is_diagonal_to(Cell::new(1, 2)));
    }

    #[test]
    fn shape_basics() {
        let s = Shape::new(2, 3);
        assert_eq!(s.len(), 6);
        assert!(!s.is_empty());
        assert!(s.contains(Cell::new(0, 0)));
        assert!(s.contains(Cell::new(1, 2)));
        assert!(!s.contains(Cell::new(2, 0)));
        assert!(!s.contains(Cell::new(0, 3)));
        assert!(!s.contains(Cell::new(-1, 0)));
        assert!(Shape::new(0, 4).is_empty());
    }

    #[test]
    fn index_round_trip() {
        let s = Shape::new(3, 4);
        for (i, c) in s.iter().enumerate() {
            assert_eq!(s.index(c), Some(i));
            assert_eq!(s.cell(i), c);
        }
        assert_eq!(s.index(Cell::new(3, 0)), None);
    }

    #[test]
    fn shape_iter_len() {
        let s = Shape::new(3, 2);
        let mut it = s.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        let cells: Vec<_> = s.into_iter().collect();
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(2, 1));
    }
}
