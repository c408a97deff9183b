//! The scalar field and its solid mask.

// Ratio of counts; precision loss is irrelevant at practical grid sizes.
#![allow(clippy::cast_precision_loss)]

use cell_grid::UnitCellGrid;
use tracing::debug;

use crate::error::{FieldError, FieldResult};
use crate::region::{penalty_field, Region};

/// A scalar field sampled on a [`UnitCellGrid`].
///
/// Sign convention: `U <= 0` denotes solid, `U > 0` denotes void. The
/// binary `solid` mask is recomputed on every mutation of `U`, so the
/// invariant `solid == (U <= 0)` holds at all times; both arrays always
/// match the grid shape.
#[derive(Debug, Clone)]
pub struct ScalarField {
    grid: UnitCellGrid,
    u: Vec<f64>,
    solid: Vec<bool>,
}

impl ScalarField {
    /// Create an all-void field (every value `+1`).
    ///
    /// This is the "no-op" state left behind by generators whose
    /// collaborator input was empty.
    #[must_use]
    pub fn empty(grid: UnitCellGrid) -> Self {
        let u = vec![1.0; grid.len()];
        let solid = vec![false; grid.len()];
        Self { grid, u, solid }
    }

    /// Create a field from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ValueCountMismatch`] if `u` does not match the
    /// grid point count.
    pub fn from_values(grid: UnitCellGrid, u: Vec<f64>) -> FieldResult<Self> {
        let mut field = Self::empty(grid);
        field.set_values(u)?;
        Ok(field)
    }

    /// Replace the field values, recomputing the solid mask.
    ///
    /// Every mutation of `U` goes through here, which is what keeps the
    /// `solid == (U <= 0)` invariant intact.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ValueCountMismatch`] on a shape mismatch.
    pub fn set_values(&mut self, u: Vec<f64>) -> FieldResult<()> {
        if u.len() != self.grid.len() {
            return Err(FieldError::ValueCountMismatch {
                got: u.len(),
                expected: self.grid.len(),
                dims: self.grid.dims(),
            });
        }
        self.solid.clear();
        self.solid.extend(u.iter().map(|&v| v <= 0.0));
        self.u = u;
        Ok(())
    }

    /// The sampling grid.
    #[must_use]
    pub const fn grid(&self) -> &UnitCellGrid {
        &self.grid
    }

    /// The field values, x-fastest linear order.
    #[must_use]
    pub fn u(&self) -> &[f64] {
        &self.u
    }

    /// The solid mask, x-fastest linear order.
    #[must_use]
    pub fn solid(&self) -> &[bool] {
        &self.solid
    }

    /// Field value at grid coordinates.
    #[inline]
    #[must_use]
    pub fn u_at(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        self.u[self.grid.index(ix, iy, iz)]
    }

    /// Solid flag at grid coordinates.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, ix: usize, iy: usize, iz: usize) -> bool {
        self.solid[self.grid.index(ix, iy, iz)]
    }

    /// Number of solid voxels.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Solid volume fraction of the grid.
    #[must_use]
    pub fn relative_density(&self) -> f64 {
        if self.u.is_empty() {
            return 0.0;
        }
        self.solid_count() as f64 / self.u.len() as f64
    }

    /// Clip the field against a bounding region.
    ///
    /// Takes the pointwise maximum of `U` with the region's outside-region
    /// penalty field, enforcing solid-only-inside-region without altering
    /// the interior topology.
    ///
    /// # Errors
    ///
    /// Returns an error if the region's penalty field cannot be built
    /// (e.g. an empty boundary mesh).
    pub fn clip(&mut self, region: &Region) -> FieldResult<()> {
        let penalty = penalty_field(region, &self.grid)?;
        debug!(region = ?std::mem::discriminant(region), "clipping field against region");
        let clipped: Vec<f64> = self
            .u
            .iter()
            .zip(penalty.iter())
            .map(|(&u, &p)| u.max(p))
            .collect();
        self.set_values(clipped)
    }
}
