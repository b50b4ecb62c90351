//! Analytic estimate of the propagation working set.

use std::fmt;
use std::mem::size_of;

use gridfinder_core::{Cell, Raster};

/// Byte sizes of the per-cell arrays live during a propagation run.
///
/// The frontier is not included: its size depends on how many stale
/// entries the sweep accumulates, which is not known up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryEstimate {
    pub targets: usize,
    pub costs: usize,
    pub visited: usize,
    pub distances: usize,
    pub predecessors: usize,
}

impl MemoryEstimate {
    /// Sum of all arrays, in bytes.
    pub fn total_bytes(&self) -> usize {
        self.targets + self.costs + self.visited + self.distances + self.predecessors
    }

    /// Total in decimal gigabytes (1e9 bytes).
    pub fn gigabytes(&self) -> f64 {
        self.total_bytes() as f64 / 1e9
    }
}

impl fmt::Display for MemoryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} GB", self.gigabytes())
    }
}

/// Estimate the memory a propagation over these inputs will need.
///
/// Sized from element counts and element widths only; the arrays are never
/// copied or serialized.
pub fn estimate_mem_use<T, C>(targets: &Raster<T>, costs: &Raster<C>) -> MemoryEstimate {
    let cells = targets.len();
    MemoryEstimate {
        targets: cells * size_of::<T>(),
        costs: costs.len() * size_of::<C>(),
        visited: cells * size_of::<bool>(),
        distances: cells * size_of::<f64>(),
        predecessors: cells * size_of::<Option<Cell>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfinder_core::Shape;

    #[test]
    fn sizes_each_array() {
        let targets = Raster::filled(Shape::new(10, 20), 0u8);
        let costs = Raster::filled(Shape::new(10, 20), 0.0f32);
        let est = estimate_mem_use(&targets, &costs);
        assert_eq!(est.targets, 200);
        assert_eq!(est.costs, 800);
        assert_eq!(est.visited, 200);
        assert_eq!(est.distances, 1600);
        assert_eq!(est.predecessors, 200 * size_of::<Option<Cell>>());
    }

    #[test]
    fn grows_linearly_with_cell_count() {
        let per_cell = |rows, cols| {
            let shape = Shape::new(rows, cols);
            let est = estimate_mem_use(
                &Raster::filled(shape, 0u8),
                &Raster::filled(shape, 0.0f64),
            );
            est.total_bytes() / shape.len()
        };
        assert_eq!(per_cell(4, 4), per_cell(64, 32));
        assert_eq!(per_cell(1, 1), per_cell(100, 3));
    }

    #[test]
    fn gigabytes_are_decimal() {
        let est = MemoryEstimate {
            targets: 250_000_000,
            costs: 250_000_000,
            visited: 0,
            distances: 500_000_000,
            predecessors: 0,
        };
        assert_eq!(est.gigabytes(), 1.0);
        assert_eq!(est.to_string(), "1.000 GB");
    }
}
