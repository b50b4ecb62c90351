//! Cost-distance propagation with target merging.
//!
//! A Dijkstra sweep from a single start cell over an 8-connected cost
//! raster. Whenever the sweep touches a target cell that is not yet part of
//! the network, the path that led to it is walked backwards and zeroed, so
//! the network grows through the cheapest connections between targets.

use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use gridfinder_core::{Cell, GridError, Raster, StartProblem};

use crate::frontier::FrontierEntry;
use crate::observer::{PropagationObserver, ProgressHandle, whole_percent};

/// Tuning knobs for [`Propagator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropagationConfig {
    /// Costs at or above this value mark a cell as unusable. Such cells are
    /// never relaxed into; they keep an unknown (NaN) distance unless they
    /// are targets merged into the network.
    pub barrier: f64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            barrier: f64::INFINITY,
        }
    }
}

impl PropagationConfig {
    /// Reject a NaN barrier: no cost compares `>=` to it, so it would let
    /// the sweep walk through every unusable cell.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.barrier.is_nan() {
            return Err(GridError::InvalidBarrier(self.barrier));
        }
        Ok(())
    }
}

/// A validated propagation job over borrowed input rasters.
///
/// Working arrays are allocated per [`run`](Self::run) and dropped with it.
pub struct Propagator<'a, C> {
    targets: &'a Raster<u8>,
    costs: &'a Raster<C>,
    start: Cell,
    config: PropagationConfig,
    progress: ProgressHandle,
}

impl<'a, C: Copy + Into<f64>> Propagator<'a, C> {
    /// Validate the inputs. Fails if the rasters differ in shape, or if
    /// `start` is outside the grid or not a target.
    pub fn new(
        targets: &'a Raster<u8>,
        costs: &'a Raster<C>,
        start: Cell,
    ) -> Result<Self, GridError> {
        targets.ensure_same_shape(costs)?;
        match targets.get(start).copied() {
            None => {
                return Err(GridError::InvalidStart {
                    cell: start,
                    problem: StartProblem::OutOfBounds,
                });
            }
            Some(0) => {
                return Err(GridError::InvalidStart {
                    cell: start,
                    problem: StartProblem::NotATarget,
                });
            }
            Some(_) => {}
        }
        Ok(Self {
            targets,
            costs,
            start,
            config: PropagationConfig::default(),
            progress: ProgressHandle::new(targets.len()),
        })
    }

    /// Replace the configuration (builder). Fails if `config` does not
    /// [`validate`](PropagationConfig::validate).
    pub fn with_config(mut self, config: PropagationConfig) -> Result<Self, GridError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// A handle that reports discovered ÷ total cells, readable from other
    /// threads while [`run`](Self::run) executes.
    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    /// Run the sweep and return the distance field.
    ///
    /// Cells at distance 0 form the predicted network. Cells never reached
    /// hold NaN.
    pub fn run<O: PropagationObserver>(&self, observer: O) -> Result<Raster<f64>, GridError> {
        Ok(self.sweep(observer)?.dist)
    }

    fn sweep<O: PropagationObserver>(&self, mut observer: O) -> Result<Sweep, GridError> {
        let shape = self.targets.shape();
        let total = shape.len();
        let barrier = self.config.barrier;

        let mut s = Sweep {
            dist: Raster::filled(shape, f64::NAN),
            visited: Raster::filled(shape, false),
            prev: Raster::filled(shape, None),
            frontier: BinaryHeap::new(),
        };
        s.dist[self.start] = 0.0;
        s.frontier.push(FrontierEntry {
            dist: 0.0,
            cell: self.start,
        });

        self.progress.reset();
        let mut discovered = 0usize;
        let mut reported = 0u32;

        log::debug!("propagating over {shape} grid from {}", self.start);

        while let Some(entry) = s.frontier.pop() {
            let current = entry.cell;
            // Re-read: the entry may be stale.
            let current_dist = s.dist[current];

            for next in current.neighbors_8() {
                if !shape.contains(next) {
                    continue;
                }
                if s.dist[next] == 0.0 {
                    continue;
                }

                if self.targets[next] != 0 {
                    s.prev[next] = Some(current);
                    s.zero_path(next);
                    continue;
                }

                let cost: f64 = self.costs[next].into();
                if cost.is_nan() || cost < 0.0 {
                    return Err(GridError::NonFiniteCost {
                        cell: next,
                        value: cost,
                    });
                }
                if cost >= barrier {
                    continue;
                }

                let step = if current.is_diagonal_to(next) {
                    cost * SQRT_2
                } else {
                    cost
                };
                let next_dist = current_dist + step;

                if s.visited[next] {
                    if next_dist < s.dist[next] {
                        s.dist[next] = next_dist;
                        s.prev[next] = Some(current);
                        s.frontier.push(FrontierEntry {
                            dist: next_dist,
                            cell: next,
                        });
                    }
                    continue;
                }

                s.frontier.push(FrontierEntry {
                    dist: next_dist,
                    cell: next,
                });
                s.visited[next] = true;
                s.dist[next] = next_dist;
                s.prev[next] = Some(current);

                discovered += 1;
                self.progress.set_discovered(discovered);
                let percent = whole_percent(discovered, total);
                if percent > reported {
                    reported = percent;
                    observer.on_progress(percent);
                    observer.on_snapshot(percent, &s.dist);
                }
            }
        }

        log::debug!("propagation finished, {discovered} of {total} cells discovered");
        Ok(s)
    }
}

/// Run a propagation with the default configuration.
///
/// Convenience wrapper over [`Propagator::new`] and [`Propagator::run`].
pub fn optimise<C, O>(
    targets: &Raster<u8>,
    costs: &Raster<C>,
    start: Cell,
    observer: O,
) -> Result<Raster<f64>, GridError>
where
    C: Copy + Into<f64>,
    O: PropagationObserver,
{
    Propagator::new(targets, costs, start)?.run(observer)
}

/// Working state of one run.
struct Sweep {
    dist: Raster<f64>,
    visited: Raster<bool>,
    prev: Raster<Option<Cell>>,
    frontier: BinaryHeap<FrontierEntry>,
}

impl Sweep {
    /// Zero `from` and every cell upstream of it along predecessor links,
    /// re-queueing each at distance 0. Stops at the first cell that is
    /// already 0 or has no predecessor.
    fn zero_path(&mut self, from: Cell) {
        let mut next = Some(from);
        while let Some(cell) = next {
            if self.dist[cell] == 0.0 {
                break;
            }
            self.dist[cell] = 0.0;
            self.visited[cell] = true;
            self.frontier.push(FrontierEntry { dist: 0.0, cell });
            next = self.prev[cell];
        }
    }
}
