//! Voxel mask to hexahedral connectivity.

// Corner-lattice index arithmetic.
#![allow(clippy::cast_precision_loss)]

use cell_field::ScalarField;
use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::debug;

/// A hexahedral element mesh extracted from a solid mask.
///
/// Node ids are global over the `(nx+1) x (ny+1) x (nz+1)` corner lattice
/// and 1-based; `node_ids`/`node_coords` list only the nodes referenced by
/// at least one solid element, in ascending id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexMesh {
    /// Global 1-based ids of the referenced nodes, ascending.
    pub node_ids: Vec<u64>,
    /// World coordinates of the referenced nodes, parallel to `node_ids`.
    pub node_coords: Vec<Point3<f64>>,
    /// Elements as eight global node ids, bottom ring counterclockwise
    /// then top ring.
    pub elements: Vec<[u64; 8]>,
}

impl HexMesh {
    /// Number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of referenced nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Whether the mesh has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Build the hexahedral mesh of a field's solid mask.
///
/// One 8-node brick is emitted per solid voxel; the voxel at grid
/// coordinates `(i, j, k)` spans one voxel edge toward the positive axes,
/// so its corners live on the corner lattice at `(i..=i+1, j..=j+1,
/// k..=k+1)`.
#[must_use]
pub fn build_hex_mesh(field: &ScalarField) -> HexMesh {
    let grid = field.grid();
    let (nx, ny, nz) = grid.dims();
    let h = grid.voxel_size();
    let lower = grid.bounds().min;

    // Corner lattice is one node larger per axis than the voxel grid.
    let (cx, cy) = ((nx + 1) as u64, (ny + 1) as u64);
    let gid = |i: u64, j: u64, k: u64| 1 + i + j * cx + k * cx * cy;

    let mut elements = Vec::new();
    let mut nodes: HashMap<u64, Point3<f64>> = HashMap::new();

    for iz in 0..nz {
        for iy in 0..ny {
            for ix in 0..nx {
                if !field.is_solid(ix, iy, iz) {
                    continue;
                }
                let (i, j, k) = (ix as u64, iy as u64, iz as u64);
                let corners = [
                    (i, j, k),
                    (i + 1, j, k),
                    (i + 1, j + 1, k),
                    (i, j + 1, k),
                    (i, j, k + 1),
                    (i + 1, j, k + 1),
                    (i + 1, j + 1, k + 1),
                    (i, j + 1, k + 1),
                ];

                let mut element = [0u64; 8];
                for (slot, &(ci, cj, ck)) in corners.iter().enumerate() {
                    let id = gid(ci, cj, ck);
                    element[slot] = id;
                    nodes.entry(id).or_insert_with(|| {
                        Point3::new(
                            lower.x + ci as f64 * h,
                            lower.y + cj as f64 * h,
                            lower.z + ck as f64 * h,
                        )
                    });
                }
                elements.push(element);
            }
        }
    }

    let mut node_ids: Vec<u64> = nodes.keys().copied().collect();
    node_ids.sort_unstable();
    let node_coords = node_ids.iter().map(|id| nodes[id]).collect();

    debug!(
        elements = elements.len(),
        nodes = node_ids.len(),
        "hex mesh built"
    );

    HexMesh {
        node_ids,
        node_coords,
        elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cell_grid::UnitCellGrid;
    use cell_types::Aabb;

    fn grid() -> UnitCellGrid {
        UnitCellGrid::new(
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
            0.5,
        )
        .expect("valid grid")
    }

    #[test]
    fn single_voxel_exports_one_element() {
        let grid = grid();
        let mut u = vec![1.0; grid.len()];
        u[grid.index(1, 1, 1)] = -1.0;
        let field = ScalarField::from_values(grid, u).expect("shape ok");

        let mesh = build_hex_mesh(&field);
        assert_eq!(mesh.element_count(), 1);
        assert_eq!(mesh.node_count(), 8);

        // Eight distinct node ids.
        let element = mesh.elements[0];
        let mut ids = element.to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);

        // Corners at the expected world coordinates: the voxel at
        // (1, 1, 1) spans [0.5, 1.0] per axis.
        for (id, coord) in mesh.node_ids.iter().zip(&mesh.node_coords) {
            assert!(element.contains(id));
            for axis in 0..3 {
                let v = coord[axis];
                assert!(
                    (v - 0.5).abs() < 1e-12 || (v - 1.0).abs() < 1e-12,
                    "unexpected corner coordinate {v}"
                );
            }
        }
        // First corner is the voxel's own position.
        assert_relative_eq!(mesh.node_coords[0].x, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_mask_exports_nothing() {
        let grid = grid();
        let field = ScalarField::empty(grid);
        let mesh = build_hex_mesh(&field);
        assert!(mesh.is_empty());
        assert_eq!(mesh.node_count(), 0);
    }

    #[test]
    fn adjacent_voxels_share_nodes() {
        let grid = grid();
        let mut u = vec![1.0; grid.len()];
        u[grid.index(0, 0, 0)] = -1.0;
        u[grid.index(1, 0, 0)] = -1.0;
        let field = ScalarField::from_values(grid, u).expect("shape ok");

        let mesh = build_hex_mesh(&field);
        assert_eq!(mesh.element_count(), 2);
        // 2 bricks sharing a face: 12 nodes, not 16.
        assert_eq!(mesh.node_count(), 12);
    }

    #[test]
    fn ids_are_one_based_and_ascending() {
        let grid = grid();
        let mut u = vec![1.0; grid.len()];
        u[grid.index(0, 0, 0)] = -1.0;
        let field = ScalarField::from_values(grid, u).expect("shape ok");

        let mesh = build_hex_mesh(&field);
        assert_eq!(mesh.node_ids[0], 1);
        assert!(mesh.node_ids.windows(2).all(|w| w[0] < w[1]));
    }
}
