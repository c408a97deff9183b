//! Surface normal orientation from the field gradient.

use cell_field::ScalarField;
use tracing::debug;

use crate::filter::{convolve_axis_wrap, gaussian_kernel, sobel_gradient};
use crate::map::{PropertyKind, PropertyMap};

/// Parameters for orientation evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationParams {
    /// Standard deviation of the pre-smoothing Gaussian, in voxels.
    pub smoothing_sigma: f64,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            smoothing_sigma: 0.5,
        }
    }
}

/// Compute azimuth and inclination of the local surface normal.
///
/// The field is mildly smoothed (separable Gaussian), then differentiated
/// with a 3D Sobel kernel. Azimuth is the in-plane angle `atan2(gy, gx)`,
/// inclination is `90° + elevation` of the normal; both in degrees.
///
/// Results are stored under [`PropertyKind::Azimuth`] and
/// [`PropertyKind::Inclination`].
pub fn orientation(field: &ScalarField, params: &OrientationParams, map: &mut PropertyMap) {
    let dims = field.grid().dims();
    debug!(?dims, sigma = params.smoothing_sigma, "evaluating surface orientation");

    let kernel = gaussian_kernel(params.smoothing_sigma);
    let smoothed = {
        let d = convolve_axis_wrap(field.u(), dims, 0, &kernel);
        let d = convolve_axis_wrap(&d, dims, 1, &kernel);
        convolve_axis_wrap(&d, dims, 2, &kernel)
    };

    let (gx, gy, gz) = sobel_gradient(&smoothed, dims);

    let mut azimuth = Vec::with_capacity(gx.len());
    let mut inclination = Vec::with_capacity(gx.len());
    for i in 0..gx.len() {
        azimuth.push(gy[i].atan2(gx[i]).to_degrees());
        let elevation = gz[i].atan2(gx[i].hypot(gy[i])).to_degrees();
        inclination.push(90.0 + elevation);
    }

    map.insert(PropertyKind::Azimuth, azimuth);
    map.insert(PropertyKind::Inclination, inclination);
}
