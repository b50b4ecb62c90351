//! **gridfinder-core**: grid primitives for cost-distance network prediction.
//!
//! This crate provides the foundational types used across the *gridfinder*
//! workspace: cell coordinates and raster extents, an owned row-major raster,
//! the affine transform carried alongside rasters, and the shared error type.

pub mod error;
pub mod geom;
pub mod raster;
pub mod transform;

pub use error::{GridError, StartProblem};
pub use geom::{Cell, Shape, ShapeIter};
pub use raster::Raster;
pub use transform::GeoTransform;
