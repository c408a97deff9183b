//! Layer-wise manufacturability (build risk) heuristic.

// Kernel offset arithmetic.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use cell_field::ScalarField;
use rayon::prelude::*;
use tracing::debug;

use crate::map::{PropertyKind, PropertyMap};

/// Parameters of the build-risk kernel.
///
/// The kernel models heat/support accumulation during layer-wise
/// fabrication: a downward-weighted Gaussian footprint in the horizontal
/// plane combined with a linear vertical bias. The `self_weight` factor
/// down-weighting the current layer is an empirically chosen process
/// constant from the source calibration with no documented derivation;
/// it is kept configurable pending domain-expert review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildRiskParams {
    /// Kernel half-extent in voxels (kernel spans `2r + 1` per axis).
    pub kernel_radius: usize,
    /// Standard deviation of the horizontal Gaussian footprint, voxels.
    pub footprint_sigma: f64,
    /// Down-weighting factor for the current layer's own contribution.
    pub self_weight: f64,
}

impl Default for BuildRiskParams {
    fn default() -> Self {
        Self {
            kernel_radius: 2,
            footprint_sigma: 1.0,
            self_weight: 0.2,
        }
    }
}

/// Compute the build-risk score at every voxel.
///
/// The solid mask is padded with a solid base plate below the first layer
/// (air above needs no padding: the kernel's upper half is zero, since
/// material above the current layer contributes no support). The risk at a
/// solid voxel is `1 - min(1, support)`, the fraction of locally
/// unsupported material. Void voxels report NaN ("not applicable"), never
/// a numeric zero.
///
/// The result is stored under [`PropertyKind::BuildRisk`].
pub fn build_risk(field: &ScalarField, params: &BuildRiskParams, map: &mut PropertyMap) {
    let (nx, ny, nz) = field.grid().dims();
    let solid = field.solid();
    debug!(dims = ?(nx, ny, nz), "evaluating build risk");

    let kernel = support_kernel(params);
    let r = params.kernel_radius as isize;

    let mut risk = vec![f64::NAN; solid.len()];
    risk.par_chunks_mut(nx * ny)
        .enumerate()
        .for_each(|(iz, plane)| {
            for iy in 0..ny {
                for ix in 0..nx {
                    if !solid[ix + iy * nx + iz * nx * ny] {
                        continue;
                    }

                    let mut support = 0.0;
                    let mut k = 0;
                    for dz in -r..=0 {
                        let jz = iz as isize + dz;
                        for dy in -r..=r {
                            let jy = (iy as isize + dy).rem_euclid(ny as isize) as usize;
                            for dx in -r..=r {
                                let jx = (ix as isize + dx).rem_euclid(nx as isize) as usize;
                                // Below the first layer sits the solid
                                // base plate.
                                let occupied = if jz < 0 {
                                    true
                                } else {
                                    solid[jx + jy * nx + jz as usize * nx * ny]
                                };
                                if occupied {
                                    support += kernel[k];
                                }
                                k += 1;
                            }
                        }
                    }

                    plane[ix + iy * nx] = 1.0 - support.min(1.0);
                }
            }
        });

    map.insert(PropertyKind::BuildRisk, risk);
}

/// Build the normalized support kernel, flattened over
/// `dz in -r..=0, dy in -r..=r, dx in -r..=r` (matching the traversal in
/// [`build_risk`]).
fn support_kernel(params: &BuildRiskParams) -> Vec<f64> {
    let r = params.kernel_radius as isize;
    let sigma2 = 2.0 * params.footprint_sigma * params.footprint_sigma;

    let mut kernel = Vec::with_capacity(((r + 1) * (2 * r + 1) * (2 * r + 1)) as usize);
    for dz in -r..=0 {
        // Linear vertical bias: full weight at the current layer, fading
        // with depth.
        let vertical = 1.0 + dz as f64 / (r as f64 + 1.0);
        let layer_scale = if dz == 0 { params.self_weight } else { 1.0 };
        for dy in -r..=r {
            for dx in -r..=r {
                let footprint = (-((dx * dx + dy * dy) as f64) / sigma2).exp();
                kernel.push(footprint * vertical * layer_scale);
            }
        }
    }

    let sum: f64 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}
