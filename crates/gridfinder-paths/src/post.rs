//! Post-processing of a distance field.

use gridfinder_core::Raster;

/// Mark cells whose distance is within `tolerance` of the network.
///
/// Returns a 0/1 mask; unknown (NaN) distances are never part of the
/// network. A tolerance of 0 keeps exactly the zero-distance cells.
pub fn threshold_distances(dist: &Raster<f64>, tolerance: f64) -> Raster<u8> {
    dist.map(|&d| u8::from(d <= tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tolerance_keeps_network() {
        let dist = Raster::from_rows(&[vec![0.0, 0.5, f64::NAN], vec![0.0, 2.0, 0.0]]).unwrap();
        let net = threshold_distances(&dist, 0.0);
        assert_eq!(net.to_rows(), vec![vec![1, 0, 0], vec![1, 0, 1]]);
    }

    #[test]
    fn tolerance_widens_network() {
        let dist = Raster::from_rows(&[vec![0.0, 0.5, 1.0, f64::NAN]]).unwrap();
        let net = threshold_distances(&dist, 0.5);
        assert_eq!(net.as_slice(), &[1, 1, 0, 0]);
    }
}
