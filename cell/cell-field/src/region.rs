//! Bounding regions for field clipping.

use cell_grid::UnitCellGrid;
use cell_types::{Aabb, TriMesh};

use crate::error::{FieldError, FieldResult};
use crate::raster::{mesh_solid_mask, signed_field_from_mask};

/// A bounding region the field can be clipped against.
///
/// Clipping takes the pointwise maximum of `U` with the region's penalty
/// field (negative inside the region, positive outside), so material can
/// only survive inside the region while the interior topology is
/// untouched.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Region {
    /// A rectangular box.
    Box(Aabb),
    /// A circular cylinder along z, defined in the xy-plane.
    Cylinder {
        /// Cylinder axis position (x, y).
        center: (f64, f64),
        /// Cylinder radius.
        radius: f64,
    },
    /// An arbitrary region bounded by a closed triangle mesh.
    BoundaryMesh(TriMesh),
}

/// Build the outside-region penalty field for a grid.
pub(crate) fn penalty_field(region: &Region, grid: &UnitCellGrid) -> FieldResult<Vec<f64>> {
    match region {
        Region::Box(aabb) => Ok(grid
            .iter_points()
            .map(|(_, _, _, p)| {
                // Largest per-axis excursion outside the box; negative
                // inside.
                let dx = (aabb.min.x - p.x).max(p.x - aabb.max.x);
                let dy = (aabb.min.y - p.y).max(p.y - aabb.max.y);
                let dz = (aabb.min.z - p.z).max(p.z - aabb.max.z);
                dx.max(dy).max(dz)
            })
            .collect()),
        Region::Cylinder { center, radius } => Ok(grid
            .iter_points()
            .map(|(_, _, _, p)| {
                let dx = p.x - center.0;
                let dy = p.y - center.1;
                dx.hypot(dy) - radius
            })
            .collect()),
        Region::BoundaryMesh(mesh) => {
            if mesh.is_empty() {
                return Err(FieldError::EmptyRegionMesh);
            }
            let solid = mesh_solid_mask(mesh, grid);
            Ok(signed_field_from_mask(&solid, grid))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cell_types::Point3;

    fn grid() -> UnitCellGrid {
        UnitCellGrid::new(
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
            0.1,
        )
        .expect("valid grid")
    }

    #[test]
    fn box_penalty_signs() {
        let grid = grid();
        let region = Region::Box(Aabb::new(
            Point3::new(0.2, 0.2, 0.2),
            Point3::new(0.8, 0.8, 0.8),
        ));
        let penalty = penalty_field(&region, &grid).expect("penalty ok");
        assert!(penalty[grid.index(5, 5, 5)] < 0.0);
        assert!(penalty[grid.index(0, 0, 0)] > 0.0);
    }

    #[test]
    fn cylinder_penalty_signs() {
        let grid = grid();
        let region = Region::Cylinder {
            center: (0.5, 0.5),
            radius: 0.3,
        };
        let penalty = penalty_field(&region, &grid).expect("penalty ok");
        // On the axis: well inside regardless of z.
        assert!(penalty[grid.index(5, 5, 0)] < 0.0);
        assert!(penalty[grid.index(5, 5, 10)] < 0.0);
        // Grid corner: outside.
        assert!(penalty[grid.index(0, 0, 5)] > 0.0);
    }

    #[test]
    fn empty_boundary_mesh_rejected() {
        let grid = grid();
        let region = Region::BoundaryMesh(TriMesh::new());
        assert!(matches!(
            penalty_field(&region, &grid),
            Err(FieldError::EmptyRegionMesh)
        ));
    }
}
