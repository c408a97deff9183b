//! Periodic DOF numbering and sparse system assembly.
//!
//! Node indices wrap at the cell boundary, which is what encodes the
//! periodic boundary conditions: opposite faces of the unit cell share
//! their nodes, so the solution is the periodic fluctuation part of the
//! displacement. One node is pinned to remove the rigid-translation
//! nullspace.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::element::ElementMatrices;

/// Degrees of freedom pinned to zero (all three directions of node 0).
pub(crate) const PINNED_DOFS: usize = 3;

/// Periodic voxel mesh bookkeeping.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodicMesh {
    pub nelx: usize,
    pub nely: usize,
    pub nelz: usize,
}

impl PeriodicMesh {
    pub(crate) const fn new(dims: (usize, usize, usize)) -> Self {
        Self {
            nelx: dims.0,
            nely: dims.1,
            nelz: dims.2,
        }
    }

    /// Number of independent (periodic) nodes.
    pub(crate) const fn node_count(&self) -> usize {
        self.nelx * self.nely * self.nelz
    }

    /// Number of degrees of freedom.
    pub(crate) const fn dof_count(&self) -> usize {
        3 * self.node_count()
    }

    /// Periodic node id of grid corner `(i, j, k)`.
    const fn node(&self, i: usize, j: usize, k: usize) -> usize {
        let i = i % self.nelx;
        let j = j % self.nely;
        let k = k % self.nelz;
        i + j * self.nelx + k * self.nelx * self.nely
    }

    /// The 24 global DOFs of element `(ex, ey, ez)`, in the element's
    /// local corner order.
    pub(crate) fn element_dofs(&self, ex: usize, ey: usize, ez: usize) -> [usize; 24] {
        let corners = [
            self.node(ex, ey, ez),
            self.node(ex + 1, ey, ez),
            self.node(ex + 1, ey + 1, ez),
            self.node(ex, ey + 1, ez),
            self.node(ex, ey, ez + 1),
            self.node(ex + 1, ey, ez + 1),
            self.node(ex + 1, ey + 1, ez + 1),
            self.node(ex, ey + 1, ez + 1),
        ];

        let mut dofs = [0usize; 24];
        for (a, &n) in corners.iter().enumerate() {
            dofs[3 * a] = 3 * n;
            dofs[3 * a + 1] = 3 * n + 1;
            dofs[3 * a + 2] = 3 * n + 2;
        }
        dofs
    }
}

/// Assemble the global stiffness matrix and the six load-case right-hand
/// sides.
///
/// `lame` yields `(lambda, mu)` per element in x-fastest order. Pinned
/// DOFs get an identity diagonal and zeroed load entries.
pub(crate) fn assemble(
    mesh: &PeriodicMesh,
    em: &ElementMatrices,
    lame: &[(f64, f64)],
) -> (CsrMatrix<f64>, DMatrix<f64>) {
    let ndof = mesh.dof_count();
    let mut coo = CooMatrix::new(ndof, ndof);
    let mut rhs = DMatrix::<f64>::zeros(ndof, 6);

    for ez in 0..mesh.nelz {
        for ey in 0..mesh.nely {
            for ex in 0..mesh.nelx {
                let e = ex + ey * mesh.nelx + ez * mesh.nelx * mesh.nely;
                let (lambda, mu) = lame[e];
                let dofs = mesh.element_dofs(ex, ey, ez);

                for (a, &row) in dofs.iter().enumerate() {
                    if row < PINNED_DOFS {
                        continue;
                    }
                    for (b, &col) in dofs.iter().enumerate() {
                        if col < PINNED_DOFS {
                            continue;
                        }
                        let value = lambda * em.ke_lambda[(a, b)] + mu * em.ke_mu[(a, b)];
                        coo.push(row, col, value);
                    }
                    for c in 0..6 {
                        rhs[(row, c)] += lambda * em.fe_lambda[(a, c)] + mu * em.fe_mu[(a, c)];
                    }
                }
            }
        }
    }

    for d in 0..PINNED_DOFS {
        coo.push(d, d, 1.0);
    }

    (CsrMatrix::from(&coo), rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::element_matrices;

    #[test]
    fn single_element_mesh_collapses_to_one_node() {
        let mesh = PeriodicMesh::new((1, 1, 1));
        assert_eq!(mesh.node_count(), 1);
        let dofs = mesh.element_dofs(0, 0, 0);
        // Every corner wraps to node 0.
        assert!(dofs.iter().all(|&d| d < 3));
    }

    #[test]
    fn dof_numbering_wraps() {
        let mesh = PeriodicMesh::new((2, 2, 2));
        let dofs_corner = mesh.element_dofs(1, 1, 1);
        // The (+,+,+) corner of the last element wraps back to node 0.
        assert_eq!(dofs_corner[3 * 6], 0);
    }

    #[test]
    fn dof_counts() {
        let mesh = PeriodicMesh::new((3, 2, 4));
        assert_eq!(mesh.node_count(), 24);
        assert_eq!(mesh.dof_count(), 72);
    }

    #[test]
    fn assembled_matrix_shape_and_symmetry() {
        let mesh = PeriodicMesh::new((2, 2, 2));
        let em = element_matrices(0.5, 0.5, 0.5);
        let lame = vec![(0.6, 0.4); 8];
        let (k, rhs) = assemble(&mesh, &em, &lame);

        assert_eq!(k.nrows(), 24);
        assert_eq!(rhs.nrows(), 24);
        assert_eq!(rhs.ncols(), 6);

        // Symmetry via dense comparison (small system).
        let mut dense = DMatrix::<f64>::zeros(24, 24);
        for (i, j, v) in k.triplet_iter() {
            dense[(i, j)] += v;
        }
        for i in 0..24 {
            for j in 0..24 {
                assert!((dense[(i, j)] - dense[(j, i)]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn uniform_material_has_zero_rhs() {
        // Periodic assembly of identical elements cancels the unit-strain
        // loads node by node.
        let mesh = PeriodicMesh::new((2, 2, 2));
        let em = element_matrices(0.5, 0.5, 0.5);
        let lame = vec![(0.6, 0.4); 8];
        let (_, rhs) = assemble(&mesh, &em, &lame);

        for c in 0..6 {
            for r in 0..rhs.nrows() {
                assert!(rhs[(r, c)].abs() < 1e-10, "rhs[{r},{c}] = {}", rhs[(r, c)]);
            }
        }
    }
}
