//! Progress observer used by `gridfinder run`.

use std::fs;
use std::path::PathBuf;

use gridfinder_core::{GeoTransform, Raster};
use gridfinder_paths::{LogProgress, PropagationObserver};

use crate::document::{DistanceDocument, write_json};
use crate::error::CliError;

/// Logs progress and, when given a directory, writes the distance field at
/// every whole percent as `arrNNN.json`.
///
/// Write failures do not interrupt the run; the first one is kept and
/// returned by [`finish`](Self::finish). A run that fails part way should
/// call [`discard`](Self::discard) so no partial snapshots are left behind.
pub struct SnapshotWriter {
    dir: Option<PathBuf>,
    transform: GeoTransform,
    log: Option<LogProgress>,
    written: Vec<PathBuf>,
    error: Option<CliError>,
}

impl SnapshotWriter {
    /// Create a writer, creating `dir` if needed.
    pub fn new(
        dir: Option<PathBuf>,
        transform: GeoTransform,
        silent: bool,
    ) -> Result<Self, CliError> {
        if let Some(dir) = &dir {
            fs::create_dir_all(dir).map_err(|source| CliError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self {
            dir,
            transform,
            log: (!silent).then_some(LogProgress),
            written: Vec::new(),
            error: None,
        })
    }

    /// Number of snapshots written, or the first write error.
    pub fn finish(self) -> Result<usize, CliError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.written.len()),
        }
    }

    /// Remove every snapshot written so far. The directory itself is kept.
    pub fn discard(self) {
        for path in &self.written {
            if let Err(e) = fs::remove_file(path) {
                log::warn!("could not remove snapshot {}: {e}", path.display());
            }
        }
        if !self.written.is_empty() {
            log::debug!("discarded {} partial snapshots", self.written.len());
        }
    }
}

impl PropagationObserver for SnapshotWriter {
    fn on_progress(&mut self, percent: u32) {
        if let Some(logger) = &mut self.log {
            logger.on_progress(percent);
        }
    }

    fn on_snapshot(&mut self, percent: u32, dist: &Raster<f64>) {
        let Some(dir) = &self.dir else {
            return;
        };
        if self.error.is_some() {
            return;
        }
        let path = dir.join(format!("arr{percent:03}.json"));
        match write_json(&path, &DistanceDocument::new(dist, self.transform)) {
            Ok(()) => self.written.push(path),
            Err(e) => {
                log::warn!("snapshot {} failed: {e}", path.display());
                self.error = Some(e);
            }
        }
    }
}
