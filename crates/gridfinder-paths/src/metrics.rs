//! Accuracy of a predicted network against ground truth.
//!
//! Both inputs are 0/1 masks on the same grid. Optionally both are first
//! down-sampled to coarser blocks, where a block is positive if any cell in
//! it is positive.

use gridfinder_core::{Cell, GridError, Raster, Shape};

/// Cell counts of a binary prediction against ground truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[cfg_attr(feature = "serde", serde(rename = "fn"))]
    pub fn_: u64,
}

impl ConfusionMatrix {
    /// Total number of scored cells.
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// `tp / (tp + fp)`, or `None` with no positive predictions.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.tp, self.tp + self.fp)
    }

    /// `tp / (tp + fn)`, or `None` with no positive ground truth.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// `(tp + tn) / total`, or `None` for an empty grid.
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.tp + self.tn, self.total())
    }

    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> Option<f64> {
        ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

fn ratio(num: u64, den: u64) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

/// Compare `prediction` with `ground_truth`, cell by cell.
///
/// Nonzero values are positives. With `block = Some(k)` both masks are
/// first max-pooled over `k × k` blocks; partial blocks at the right and
/// bottom edges are kept.
pub fn eval_confusion_matrix(
    ground_truth: &Raster<u8>,
    prediction: &Raster<u8>,
    block: Option<usize>,
) -> Result<ConfusionMatrix, GridError> {
    ground_truth.ensure_same_shape(prediction)?;

    let pooled;
    let (truth, guess) = match block {
        Some(k) => {
            pooled = (downsample_max(ground_truth, k)?, downsample_max(prediction, k)?);
            (&pooled.0, &pooled.1)
        }
        None => (ground_truth, prediction),
    };

    let mut m = ConfusionMatrix::default();
    for (&t, &g) in truth.as_slice().iter().zip(guess.as_slice()) {
        match (t != 0, g != 0) {
            (true, true) => m.tp += 1,
            (false, true) => m.fp += 1,
            (false, false) => m.tn += 1,
            (true, false) => m.fn_ += 1,
        }
    }
    log::debug!("confusion matrix over {} cells: {m:?}", m.total());
    Ok(m)
}

/// Max-pool a 0/1 mask over `block × block` cells.
///
/// The result has `ceil(rows / block) × ceil(cols / block)` cells.
pub fn downsample_max(mask: &Raster<u8>, block: usize) -> Result<Raster<u8>, GridError> {
    if block == 0 {
        return Err(GridError::InvalidScale(block));
    }
    let shape = mask.shape();
    let out_shape = Shape::new(shape.rows.div_ceil(block), shape.cols.div_ceil(block));
    let mut out = Raster::filled(out_shape, 0u8);
    for (cell, &v) in mask.iter() {
        if v != 0 {
            let pooled = Cell::new(cell.row / block as i32, cell.col / block as i32);
            out[pooled] = 1;
        }
    }
    Ok(out)
}
