use std::cmp::Ordering;

use gridfinder_core::Cell;

/// A tentative `(distance, cell)` pair in the propagation frontier.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the lexicographically
/// smallest pair first: lowest distance, then lowest `(row, col)`.
///
/// The distance carried here is only a priority. Entries go stale when a
/// cell is improved after being pushed; the distance field stays
/// authoritative.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub(crate) dist: f64,
    pub(crate) cell: Cell,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for min-first popping.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(dist: f64, row: i32, col: i32) -> FrontierEntry {
        FrontierEntry {
            dist,
            cell: Cell::new(row, col),
        }
    }

    #[test]
    fn pops_smallest_distance_first() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(3.0, 0, 0));
        heap.push(entry(1.0, 5, 5));
        heap.push(entry(2.0, 1, 1));
        let order: Vec<f64> = std::iter::from_fn(|| heap.pop()).map(|e| e.dist).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn ties_break_on_cell() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(0.0, 1, 0));
        heap.push(entry(0.0, 0, 2));
        heap.push(entry(0.0, 0, 1));
        let cells: Vec<Cell> = std::iter::from_fn(|| heap.pop()).map(|e| e.cell).collect();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(4.0, 2, 2));
        heap.push(entry(1.5, 2, 2));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.pop().map(|e| e.dist), Some(1.5));
    }
}
