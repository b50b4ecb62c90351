//! Input preparation: turn a target-mask raster and a cost raster into
//! propagation inputs.

use gridfinder_core::{Cell, GeoTransform, GridError, Raster};

/// Aligned inputs for [`Propagator`](crate::Propagator).
#[derive(Debug, Clone, PartialEq)]
pub struct GridInputs<C> {
    /// 0/1 target mask.
    pub targets: Raster<u8>,
    /// Traversal weights, same shape as `targets`.
    pub costs: Raster<C>,
    /// First target in row-major order.
    pub start: Cell,
    pub transform: GeoTransform,
}

/// Prepare propagation inputs from two aligned rasters.
///
/// Target values of `1` mark targets; `0` and NaN (nodata) do not. Any
/// other value is rejected. Targets are narrowed to `u8`; costs are kept at
/// the precision they arrive in, so pass an `f32` raster for the compact
/// variant.
///
/// The start cell is the first target met in row-major scan order.
pub fn get_targets_costs<T, C>(
    targets: &Raster<T>,
    costs: Raster<C>,
    transform: GeoTransform,
) -> Result<GridInputs<C>, GridError>
where
    T: Copy + Into<f64>,
{
    targets.ensure_same_shape(&costs)?;

    let mut mask = Raster::filled(targets.shape(), 0u8);
    let mut start = None;
    for (cell, &value) in targets.iter() {
        let value: f64 = value.into();
        if value == 1.0 {
            mask[cell] = 1;
            if start.is_none() {
                start = Some(cell);
            }
        } else if value != 0.0 && !value.is_nan() {
            return Err(GridError::InvalidTargetValue { cell, value });
        }
    }
    let start = start.ok_or(GridError::EmptyTargetSet)?;

    log::debug!("loaded {} grid, start cell {start}", mask.shape());

    Ok(GridInputs {
        targets: mask,
        costs,
        start,
        transform,
    })
}
