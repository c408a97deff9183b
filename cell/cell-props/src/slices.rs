//! Per-slice thickness and cross-section metrics.

// Voxel counting and tiling arithmetic.
#![allow(clippy::cast_precision_loss)]

use cell_field::distance::{squared_edt_2d, NO_FEATURE_THRESHOLD};
use cell_field::ScalarField;
use rayon::prelude::*;
use tracing::info;

/// Per-layer metrics of the solid cross sections.
///
/// Indexed by z-layer. A fully solid layer reports infinite thickness
/// (under periodic tiling it has no void to bound it); an empty layer
/// reports zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceMetrics {
    /// Maximum local thickness per layer (twice the deepest interior
    /// distance, scaled by voxel size).
    pub max_thickness: Vec<f64>,
    /// Solid cross-sectional area per layer (solid count times voxel
    /// size squared).
    pub cross_section_area: Vec<f64>,
}

impl SliceMetrics {
    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.max_thickness.len()
    }

    /// Largest per-layer thickness over the whole cell.
    #[must_use]
    pub fn overall_max_thickness(&self) -> f64 {
        self.max_thickness.iter().copied().fold(0.0, f64::max)
    }
}

impl std::fmt::Display for SliceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Slice metrics ({} layers):", self.layer_count())?;
        writeln!(f, "  Max thickness: {:.3}", self.overall_max_thickness())?;
        let total: f64 = self.cross_section_area.iter().sum();
        writeln!(f, "  Mean area: {:.3}", total / self.layer_count().max(1) as f64)?;
        Ok(())
    }
}

/// Compute per-layer maximum thickness and cross-sectional area.
///
/// Each 2D solid slice is padded periodically (wrap on both in-plane axes,
/// by 3x3 tiling) before the Euclidean distance transform of the
/// void-complement; without the wrap, distances near the border would be
/// artificially truncated since the unit cell tiles. Layers are
/// independent and processed in parallel.
#[must_use]
pub fn slice_metrics(field: &ScalarField) -> SliceMetrics {
    let grid = field.grid();
    let (nx, ny, nz) = grid.dims();
    let h = grid.voxel_size();
    let solid = field.solid();

    info!(layers = nz, "computing per-slice thickness and area");

    let per_layer: Vec<(f64, f64)> = (0..nz)
        .into_par_iter()
        .map(|iz| {
            let slice = &solid[iz * nx * ny..(iz + 1) * nx * ny];
            let count = slice.iter().filter(|&&s| s).count();
            let area = count as f64 * h * h;
            if count == 0 {
                return (0.0, area);
            }

            // Periodic pad: 3x3 tiling, metrics read from the center tile.
            let (tx, ty) = (3 * nx, 3 * ny);
            let mut void_tiled = vec![false; tx * ty];
            for jy in 0..ty {
                for jx in 0..tx {
                    void_tiled[jx + jy * tx] = !slice[(jx % nx) + (jy % ny) * nx];
                }
            }

            let dist_sq = squared_edt_2d(&void_tiled, (tx, ty));
            let mut max_sq = 0.0f64;
            for iy in 0..ny {
                for ix in 0..nx {
                    if slice[ix + iy * nx] {
                        max_sq = max_sq.max(dist_sq[(ix + nx) + (iy + ny) * tx]);
                    }
                }
            }

            let thickness = if max_sq >= NO_FEATURE_THRESHOLD {
                f64::INFINITY
            } else {
                2.0 * max_sq.sqrt() * h
            };
            (thickness, area)
        })
        .collect();

    let mut metrics = SliceMetrics::default();
    for (thickness, area) in per_layer {
        metrics.max_thickness.push(thickness);
        metrics.cross_section_area.push(area);
    }
    metrics
}
