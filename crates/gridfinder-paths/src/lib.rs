//! Cost-distance propagation for electricity network prediction.
//!
//! Starting from one known electrified cell, the propagator sweeps a cost
//! raster outwards and pulls every other target it touches into a
//! zero-distance network. Cells at distance 0 in the result trace the
//! predicted medium-voltage lines.
//!
//! - **Loading** aligned target/cost rasters and choosing the start cell
//!   ([`get_targets_costs`])
//! - **Estimating** the working-set size of a run ([`estimate_mem_use`])
//! - **Propagating** costs with target merging ([`Propagator`], [`optimise`])
//! - **Thresholding** the distance field into a network mask
//!   ([`threshold_distances`])
//! - **Scoring** a predicted mask against ground truth
//!   ([`eval_confusion_matrix`])
//!
//! # Example
//!
//! ```
//! use gridfinder_core::{Cell, GeoTransform, Raster, Shape};
//! use gridfinder_paths::{get_targets_costs, optimise, threshold_distances};
//!
//! let targets = Raster::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
//! let costs = Raster::filled(Shape::new(2, 3), 1.0f32);
//! let inputs = get_targets_costs(&targets, costs, GeoTransform::default()).unwrap();
//!
//! let dist = optimise(&inputs.targets, &inputs.costs, inputs.start, ()).unwrap();
//! let network = threshold_distances(&dist, 0.0);
//! assert_eq!(network[Cell::new(1, 2)], 1);
//! ```

mod frontier;
mod loader;
mod memory;
mod metrics;
mod observer;
mod post;
mod propagate;

pub use loader::{GridInputs, get_targets_costs};
pub use memory::{MemoryEstimate, estimate_mem_use};
pub use metrics::{ConfusionMatrix, downsample_max, eval_confusion_matrix};
pub use observer::{LogProgress, ProgressHandle, PropagationObserver};
pub use post::threshold_distances;
pub use propagate::{PropagationConfig, Propagator, optimise};
