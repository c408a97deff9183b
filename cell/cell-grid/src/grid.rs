//! The regular voxel sampling lattice.

// Index arithmetic on grid dimensions; casts are safe for practical grids.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use cell_types::Aabb;
use nalgebra::Point3;

use crate::error::{GridError, GridResult};
use crate::pose::Pose;

/// The regular 3D sampling lattice shared by all field components.
///
/// Coordinates run from the lower to the upper bound inclusive, in steps of
/// exactly `voxel_size`; per axis there are
/// `floor((upper - lower) / voxel_size) + 1` samples. Linear indexing is
/// x-fastest (x varies across consecutive indices, then y, then z), and
/// every downstream consumer shares this convention.
///
/// # Example
///
/// ```
/// use cell_grid::UnitCellGrid;
/// use cell_types::{Aabb, Point3};
///
/// let grid = UnitCellGrid::new(
///     Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
///     0.25,
/// ).unwrap();
/// assert_eq!(grid.dims(), (5, 5, 5));
/// assert_eq!(grid.len(), 125);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellGrid {
    bounds: Aabb,
    voxel_size: f64,
    dims: (usize, usize, usize),
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
}

impl UnitCellGrid {
    /// Create a grid over `bounds` with the given voxel edge length.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidVoxelSize`] for a non-positive voxel size
    /// and [`GridError::InvalidBounds`] for degenerate bounds.
    pub fn new(bounds: Aabb, voxel_size: f64) -> GridResult<Self> {
        if !(voxel_size > 0.0 && voxel_size.is_finite()) {
            return Err(GridError::InvalidVoxelSize(voxel_size));
        }
        let size = bounds.size();
        if bounds.is_empty() || size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(GridError::InvalidBounds {
                min: [bounds.min.x, bounds.min.y, bounds.min.z],
                max: [bounds.max.x, bounds.max.y, bounds.max.z],
            });
        }

        let axis = |lower: f64, upper: f64| -> Vec<f64> {
            let count = ((upper - lower) / voxel_size).floor() as usize + 1;
            (0..count).map(|i| lower + i as f64 * voxel_size).collect()
        };

        let xs = axis(bounds.min.x, bounds.max.x);
        let ys = axis(bounds.min.y, bounds.max.y);
        let zs = axis(bounds.min.z, bounds.max.z);
        let dims = (xs.len(), ys.len(), zs.len());

        Ok(Self {
            bounds,
            voxel_size,
            dims,
            xs,
            ys,
            zs,
        })
    }

    /// Grid dimensions `(nx, ny, nz)` in samples per axis.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Total number of grid points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.dims.0 * self.dims.1 * self.dims.2
    }

    /// Check if the grid has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The voxel edge length.
    #[must_use]
    pub const fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    /// The world-space bounding box.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Coordinate sequence along the x axis.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Coordinate sequence along the y axis.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Coordinate sequence along the z axis.
    #[must_use]
    pub fn zs(&self) -> &[f64] {
        &self.zs
    }

    /// Convert 3D grid coordinates to the linear index (x fastest).
    #[inline]
    #[must_use]
    pub const fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + iy * self.dims.0 + iz * self.dims.0 * self.dims.1
    }

    /// Convert a linear index back to 3D grid coordinates.
    #[inline]
    #[must_use]
    pub const fn coords(&self, index: usize) -> (usize, usize, usize) {
        let ix = index % self.dims.0;
        let iy = (index / self.dims.0) % self.dims.1;
        let iz = index / (self.dims.0 * self.dims.1);
        (ix, iy, iz)
    }

    /// World-space position of a grid point.
    #[inline]
    #[must_use]
    pub fn position(&self, ix: usize, iy: usize, iz: usize) -> Point3<f64> {
        Point3::new(self.xs[ix], self.ys[iy], self.zs[iz])
    }

    /// Iterate over all grid points in linear-index order.
    pub fn iter_points(&self) -> impl Iterator<Item = (usize, usize, usize, Point3<f64>)> + '_ {
        let (nx, ny, nz) = self.dims;
        (0..nz).flat_map(move |iz| {
            (0..ny)
                .flat_map(move |iy| (0..nx).map(move |ix| (ix, iy, iz, self.position(ix, iy, iz))))
        })
    }

    /// Map the full grid into sampling space under a pose.
    ///
    /// Applies the pose inverse to every grid point; the result is the
    /// coordinate set implicit generators evaluate on, in linear-index
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SingularPose`] if the pose cannot be inverted.
    pub fn sample_points(&self, pose: &Pose) -> GridResult<Vec<Point3<f64>>> {
        let inverse = pose.try_inverse()?;
        Ok(self
            .iter_points()
            .map(|(_, _, _, p)| inverse.apply(&p))
            .collect())
    }
}
