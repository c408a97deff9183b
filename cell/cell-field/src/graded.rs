//! Spatially varying offset fields with degenerate-axis broadcasting.

// Gradient interpolation over integer layer counts.
#![allow(clippy::cast_precision_loss)]

use crate::error::{FieldError, FieldResult};

/// A scalar offset field that broadcasts onto the sampling grid.
///
/// Supports graded/heterogeneous unit cells: the field may be a single
/// uniform value, vary along one axis (e.g. a z gradient), or be a full 3D
/// array. Axes of length 1 are broadcast to the grid shape; any other
/// mismatch is an error rather than a silent truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedOffset {
    values: Vec<f64>,
    dims: (usize, usize, usize),
}

impl GradedOffset {
    /// A uniform offset (broadcasts to any grid).
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            values: vec![value],
            dims: (1, 1, 1),
        }
    }

    /// An offset array with explicit dimensions, x-fastest linear order.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ValueCountMismatch`] if `values` does not
    /// match `dims`.
    pub fn from_array(values: Vec<f64>, dims: (usize, usize, usize)) -> FieldResult<Self> {
        let expected = dims.0 * dims.1 * dims.2;
        if values.len() != expected {
            return Err(FieldError::ValueCountMismatch {
                got: values.len(),
                expected,
                dims,
            });
        }
        Ok(Self { values, dims })
    }

    /// A linear gradient along z, from `from` at the bottom layer to `to`
    /// at the top layer.
    #[must_use]
    pub fn gradient_z(layers: usize, from: f64, to: f64) -> Self {
        let layers = layers.max(1);
        let values = (0..layers)
            .map(|k| {
                let t = if layers == 1 {
                    0.0
                } else {
                    k as f64 / (layers - 1) as f64
                };
                (to - from).mul_add(t, from)
            })
            .collect();
        Self {
            values,
            dims: (1, 1, layers),
        }
    }

    /// Dimensions of the stored array.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Broadcast to the target grid dimensions, expanding length-1 axes.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if any axis is neither 1 nor
    /// the target length.
    pub fn broadcast(&self, target: (usize, usize, usize)) -> FieldResult<Vec<f64>> {
        let (nx, ny, nz) = target;
        let (sx, sy, sz) = self.dims;

        let compatible = |s: usize, t: usize| s == t || s == 1;
        if !(compatible(sx, nx) && compatible(sy, ny) && compatible(sz, nz)) {
            return Err(FieldError::ShapeMismatch {
                got: self.dims,
                expected: target,
            });
        }

        let mut out = Vec::with_capacity(nx * ny * nz);
        for iz in 0..nz {
            let kz = if sz == 1 { 0 } else { iz };
            for iy in 0..ny {
                let ky = if sy == 1 { 0 } else { iy };
                for ix in 0..nx {
                    let kx = if sx == 1 { 0 } else { ix };
                    out.push(self.values[kx + ky * sx + kz * sx * sy]);
                }
            }
        }
        Ok(out)
    }
}
