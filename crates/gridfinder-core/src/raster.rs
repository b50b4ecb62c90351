//! The [`Raster`] type: an owned, row-major 2D array.
//!
//! Unlike a shared view, a `Raster` exclusively owns its storage; the
//! propagation arrays are never aliased across runs.

use std::ops::{Index, IndexMut};

use crate::error::GridError;
use crate::geom::{Cell, Shape};

/// A 2D array of `T` values stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Raster<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Clone> Raster<T> {
    /// Create a raster of the given shape with every cell set to `fill`.
    pub fn filled(shape: Shape, fill: T) -> Self {
        Self {
            shape,
            data: vec![fill; shape.len()],
        }
    }

    /// Build a raster from a list of equally long rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            shape: Shape::new(rows.len(), cols),
            data,
        })
    }

    /// Copy the raster out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols() == 0 {
            return vec![Vec::new(); self.rows()];
        }
        self.data.chunks(self.cols()).map(<[T]>::to_vec).collect()
    }
}

impl<T> Raster<T> {
    /// Wrap an existing row-major buffer. Fails if its length does not
    /// match `shape`.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != shape.len() {
            return Err(GridError::DataLength {
                shape,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// The raster extent.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `c` is inside the raster.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.shape.contains(c)
    }

    /// Borrow the value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<&T> {
        self.shape.index(c).map(|i| &self.data[i])
    }

    /// The row-major backing slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The row-major backing slice, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Fail with [`GridError::ShapeMismatch`] unless `other` has the same
    /// shape as `self`.
    pub fn ensure_same_shape<U>(&self, other: &Raster<U>) -> Result<(), GridError> {
        if self.shape != other.shape {
            return Err(GridError::ShapeMismatch {
                expected: self.shape,
                found: other.shape,
            });
        }
        Ok(())
    }

    /// Apply `f` to every value, producing a raster of the same shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Raster<U> {
        Raster {
            shape: self.shape,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Row-major iterator over `(Cell, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.shape.iter().zip(self.data.iter())
    }
}

impl<T> Index<Cell> for Raster<T> {
    type Output = T;

    /// Panics if `c` is out of bounds.
    #[inline]
    fn index(&self, c: Cell) -> &T {
        match self.shape.index(c) {
            Some(i) => &self.data[i],
            None => panic!("cell {c} out of bounds for raster {}", self.shape),
        }
    }
}

impl<T> IndexMut<Cell> for Raster<T> {
    #[inline]
    fn index_mut(&mut self, c: Cell) -> &mut T {
        match self.shape.index(c) {
            Some(i) => &mut self.data[i],
            None => panic!("cell {c} out of bounds for raster {}", self.shape),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Raster<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Repr<T> {
            shape: Shape,
            data: Vec<T>,
        }
        let repr = <Repr<T> as serde::Deserialize>::deserialize(deserializer)?;
        Raster::from_vec(repr.shape, repr.data).map_err(serde::de::Error::custom)
    }
}
