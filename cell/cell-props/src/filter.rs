//! Separable convolution filters with periodic wrap.
//!
//! The unit cell tiles, so every filter wraps at the domain boundary.

// Wrap index arithmetic.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use rayon::prelude::*;

/// Convolve along one axis with a centered odd-length kernel, wrapping
/// periodically.
pub(crate) fn convolve_axis_wrap(
    data: &[f64],
    dims: (usize, usize, usize),
    axis: usize,
    kernel: &[f64],
) -> Vec<f64> {
    let (nx, ny, nz) = dims;
    debug_assert_eq!(data.len(), nx * ny * nz);
    debug_assert_eq!(kernel.len() % 2, 1);

    let n = [nx, ny, nz][axis];
    let r = (kernel.len() / 2) as isize;
    let mut out = vec![0.0; data.len()];

    out.par_chunks_mut(nx * ny)
        .enumerate()
        .for_each(|(iz, plane)| {
            for iy in 0..ny {
                for ix in 0..nx {
                    let pos = [ix, iy, iz][axis] as isize;
                    let mut acc = 0.0;
                    for (t, &kv) in kernel.iter().enumerate() {
                        let p = (pos + t as isize - r).rem_euclid(n as isize) as usize;
                        let (jx, jy, jz) = match axis {
                            0 => (p, iy, iz),
                            1 => (ix, p, iz),
                            _ => (ix, iy, p),
                        };
                        acc += kv * data[jx + jy * nx + jz * nx * ny];
                    }
                    plane[ix + iy * nx] = acc;
                }
            }
        });

    out
}

/// Normalized Gaussian kernel for a given standard deviation (in voxels).
pub(crate) fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let r = (2.0 * sigma).round().max(1.0) as usize;
    let mut kernel: Vec<f64> = (0..=2 * r)
        .map(|t| {
            let x = t as f64 - r as f64;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// 3D Sobel gradient components of a scalar field.
///
/// Central difference along the gradient axis, `[1, 2, 1]` smoothing along
/// the other two. The common scale factor cancels when the gradient is
/// used for direction only.
pub(crate) fn sobel_gradient(
    data: &[f64],
    dims: (usize, usize, usize),
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    const DIFF: [f64; 3] = [-1.0, 0.0, 1.0];
    const SMOOTH: [f64; 3] = [1.0, 2.0, 1.0];

    let gx = {
        let d = convolve_axis_wrap(data, dims, 0, &DIFF);
        let d = convolve_axis_wrap(&d, dims, 1, &SMOOTH);
        convolve_axis_wrap(&d, dims, 2, &SMOOTH)
    };
    let gy = {
        let d = convolve_axis_wrap(data, dims, 1, &DIFF);
        let d = convolve_axis_wrap(&d, dims, 0, &SMOOTH);
        convolve_axis_wrap(&d, dims, 2, &SMOOTH)
    };
    let gz = {
        let d = convolve_axis_wrap(data, dims, 2, &DIFF);
        let d = convolve_axis_wrap(&d, dims, 0, &SMOOTH);
        convolve_axis_wrap(&d, dims, 1, &SMOOTH)
    };

    (gx, gy, gz)
}
