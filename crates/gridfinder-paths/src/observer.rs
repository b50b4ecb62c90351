//! Progress reporting for a propagation run.
//!
//! [`PropagationObserver`] receives whole-percent progress ticks and
//! distance snapshots. [`ProgressHandle`] is a thread-safe counter that
//! other threads can poll while a run is in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gridfinder_core::Raster;

/// Hooks invoked each time the share of discovered cells crosses a whole
/// percent.
///
/// Observers see the run but cannot change it: the distance field they
/// receive is borrowed immutably.
pub trait PropagationObserver {
    /// Called with the new whole-percent value.
    fn on_progress(&mut self, percent: u32) {
        let _ = percent;
    }

    /// Called right after [`on_progress`](Self::on_progress) with the
    /// current distance field.
    fn on_snapshot(&mut self, percent: u32, dist: &Raster<f64>) {
        let _ = (percent, dist);
    }
}

/// Silent observer.
impl PropagationObserver for () {}

impl<O: PropagationObserver + ?Sized> PropagationObserver for &mut O {
    fn on_progress(&mut self, percent: u32) {
        (**self).on_progress(percent);
    }

    fn on_snapshot(&mut self, percent: u32, dist: &Raster<f64>) {
        (**self).on_snapshot(percent, dist);
    }
}

/// Observer that logs every progress tick at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl PropagationObserver for LogProgress {
    fn on_progress(&mut self, percent: u32) {
        log::info!("{percent} %");
    }
}

#[derive(Debug, Default)]
struct Counters {
    discovered: AtomicUsize,
    total: AtomicUsize,
}

/// Shared, externally checkable progress counter of a propagation run.
///
/// Cloning yields another handle to the same counters.
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    inner: Arc<Counters>,
}

impl ProgressHandle {
    pub(crate) fn new(total: usize) -> Self {
        let handle = Self::default();
        handle.inner.total.store(total, Ordering::Relaxed);
        handle
    }

    pub(crate) fn reset(&self) {
        self.inner.discovered.store(0, Ordering::Relaxed);
    }

    pub(crate) fn set_discovered(&self, discovered: usize) {
        self.inner.discovered.store(discovered, Ordering::Relaxed);
    }

    /// Cells discovered so far.
    pub fn discovered(&self) -> usize {
        self.inner.discovered.load(Ordering::Relaxed)
    }

    /// Cells in the grid.
    pub fn total(&self) -> usize {
        self.inner.total.load(Ordering::Relaxed)
    }

    /// Discovered ÷ total, in `[0, 1]`. An empty grid reports 0.
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.discovered() as f64 / total as f64
    }

    /// Whole percent discovered.
    pub fn percent(&self) -> u32 {
        whole_percent(self.discovered(), self.total())
    }
}

pub(crate) fn whole_percent(discovered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((discovered as u128 * 100) / total as u128) as u32
}
