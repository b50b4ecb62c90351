//! JSON documents exchanged by the CLI.
//!
//! Rasters travel as nested row arrays. Unknown values (NaN) are written as
//! `null`, and `null` inputs are read back as nodata.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use gridfinder_core::{GeoTransform, GridError, Raster};

use crate::error::CliError;

/// Input grids for `gridfinder run` and `gridfinder estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDocument {
    #[serde(default)]
    pub transform: GeoTransform,
    /// `1` for targets, `0` or `null` otherwise.
    pub targets: Vec<Vec<Option<f64>>>,
    /// Traversal weights; `null` marks an unusable cell.
    pub costs: Vec<Vec<Option<f64>>>,
}

impl GridDocument {
    /// The target rows as a raster, `null` read as NaN.
    pub fn target_raster(&self) -> Result<Raster<f64>, GridError> {
        rows_to_raster(&self.targets, f64::NAN)
    }

    /// The cost rows as a raster, `null` read as an impassable `+inf`.
    pub fn cost_raster(&self) -> Result<Raster<f64>, GridError> {
        rows_to_raster(&self.costs, f64::INFINITY)
    }
}

/// A distance field written by `gridfinder run`.
///
/// Unknown (NaN) distances are stored as `None`. JSON has no infinity
/// either, so a distance that overflowed to `inf` is also written as
/// `null` and reads back as unknown; keep costs well below `f64::MAX` to
/// avoid that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceDocument {
    pub transform: GeoTransform,
    pub distances: Vec<Vec<Option<f64>>>,
}

impl DistanceDocument {
    pub fn new(dist: &Raster<f64>, transform: GeoTransform) -> Self {
        Self {
            transform,
            distances: dist
                .map(|&d| (!d.is_nan()).then_some(d))
                .to_rows(),
        }
    }
}

/// A 0/1 network mask, written by `gridfinder run` and read by
/// `gridfinder score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskDocument {
    #[serde(default)]
    pub transform: GeoTransform,
    pub mask: Vec<Vec<u8>>,
}

impl MaskDocument {
    pub fn new(mask: &Raster<u8>, transform: GeoTransform) -> Self {
        Self {
            transform,
            mask: mask.to_rows(),
        }
    }

    pub fn raster(&self) -> Result<Raster<u8>, GridError> {
        Raster::from_rows(&self.mask)
    }
}

fn rows_to_raster(rows: &[Vec<Option<f64>>], nodata: f64) -> Result<Raster<f64>, GridError> {
    let raster = Raster::from_rows(rows)?;
    Ok(raster.map(|v| v.unwrap_or(nodata)))
}

/// Read a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as JSON to `path`, replacing any existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let io_err = |source: std::io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer(&mut out, value).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(io_err)
}
