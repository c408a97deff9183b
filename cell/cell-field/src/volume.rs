//! Volumetric data resampling (image stacks, precomputed fields).

// Interpolation index arithmetic.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use cell_grid::{Pose, UnitCellGrid};
use rayon::prelude::*;

use crate::error::{FieldError, FieldResult};

/// A 3D block of scalar samples, e.g. a loaded image stack.
///
/// The data is assumed to span the grid's bounding box in sampling space;
/// resampling applies the inverse pose transform to each grid point,
/// normalizes into `[0, 1]^3`, and interpolates trilinearly (clamped at the
/// block edges).
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeData {
    values: Vec<f64>,
    dims: (usize, usize, usize),
}

impl VolumeData {
    /// Create a volume from values in x-fastest linear order.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ValueCountMismatch`] if `values` does not
    /// match `dims`, and [`FieldError::ShapeMismatch`] if any axis is
    /// empty.
    pub fn new(values: Vec<f64>, dims: (usize, usize, usize)) -> FieldResult<Self> {
        let expected = dims.0 * dims.1 * dims.2;
        if dims.0 == 0 || dims.1 == 0 || dims.2 == 0 {
            return Err(FieldError::ShapeMismatch {
                got: dims,
                expected: (1, 1, 1),
            });
        }
        if values.len() != expected {
            return Err(FieldError::ValueCountMismatch {
                got: values.len(),
                expected,
                dims,
            });
        }
        Ok(Self { values, dims })
    }

    /// Dimensions of the block.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Trilinear sample at normalized coordinates in `[0, 1]^3` (clamped).
    #[must_use]
    pub fn sample_normalized(&self, tx: f64, ty: f64, tz: f64) -> f64 {
        let (nx, ny, nz) = self.dims;

        let locate = |t: f64, n: usize| -> (usize, usize, f64) {
            if n == 1 {
                return (0, 0, 0.0);
            }
            let x = t.clamp(0.0, 1.0) * (n - 1) as f64;
            let i0 = (x.floor() as usize).min(n - 2);
            (i0, i0 + 1, x - i0 as f64)
        };

        let (x0, x1, fx) = locate(tx, nx);
        let (y0, y1, fy) = locate(ty, ny);
        let (z0, z1, fz) = locate(tz, nz);

        let at = |ix: usize, iy: usize, iz: usize| self.values[ix + iy * nx + iz * nx * ny];

        let lerp = |a: f64, b: f64, t: f64| (b - a).mul_add(t, a);

        let c00 = lerp(at(x0, y0, z0), at(x1, y0, z0), fx);
        let c10 = lerp(at(x0, y1, z0), at(x1, y1, z0), fx);
        let c01 = lerp(at(x0, y0, z1), at(x1, y0, z1), fx);
        let c11 = lerp(at(x0, y1, z1), at(x1, y1, z1), fx);

        let c0 = lerp(c00, c10, fy);
        let c1 = lerp(c01, c11, fy);
        lerp(c0, c1, fz)
    }
}

/// Resample a volume onto the grid under a pose transform.
pub(crate) fn resample_volume(
    data: &VolumeData,
    grid: &UnitCellGrid,
    pose: &Pose,
) -> FieldResult<Vec<f64>> {
    let samples = grid.sample_points(pose)?;
    let lower = grid.bounds().min;
    let size = grid.bounds().size();

    let u = samples
        .par_iter()
        .map(|s| {
            let tx = (s.x - lower.x) / size.x;
            let ty = (s.y - lower.y) / size.y;
            let tz = (s.z - lower.z) / size.z;
            data.sample_normalized(tx, ty, tz)
        })
        .collect();

    Ok(u)
}
