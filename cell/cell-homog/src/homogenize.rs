//! The homogenization driver.

use nalgebra::{DVector, Matrix6, SMatrix};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use cell_types::MaterialPair;

use crate::assembly::{assemble, PeriodicMesh};
use crate::element::{element_matrices, unit_strain_displacements};
use crate::error::{HomogenizationError, HomogenizationResult};
use crate::params::{HomogenizationParams, SolverMethod};
use crate::solver::{inverse_diagonal, solve_direct, solve_pcg, to_dense};
use crate::stiffness::StiffnessTensor;

/// Homogenize a voxel microstructure into its effective stiffness tensor.
///
/// # Arguments
///
/// * `cell_size` - Unit-cell edge lengths `[lx, ly, lz]`
/// * `materials` - Solid- and void-phase material definitions
/// * `solid` - Voxel mask, x-fastest linear order
/// * `dims` - Voxel counts per axis
/// * `params` - Solver selection and tolerances
///
/// Each voxel becomes one trilinear hexahedral element with its Lamé
/// parameters selected from the mask; the six canonical unit macroscopic
/// strain load cases are solved under periodic boundary conditions
/// (independent systems, solved in parallel — the assembled tensor does
/// not depend on completion order).
///
/// # Errors
///
/// Returns a [`HomogenizationError`] for an empty mask, invalid materials
/// or cell size, a mask/dims mismatch, or solver failure. Use
/// [`homogenize_or_nan`] where the legacy NaN sentinel is expected
/// instead.
pub fn homogenize(
    cell_size: [f64; 3],
    materials: &MaterialPair,
    solid: &[bool],
    dims: (usize, usize, usize),
    params: &HomogenizationParams,
) -> HomogenizationResult<StiffnessTensor> {
    validate(cell_size, materials, solid, dims)?;

    let (nelx, nely, nelz) = dims;
    let nel = nelx * nely * nelz;
    info!(
        elements = nel,
        method = ?params.method,
        "homogenizing unit cell"
    );

    let dx = cell_size[0] / nelx as f64;
    let dy = cell_size[1] / nely as f64;
    let dz = cell_size[2] / nelz as f64;

    let em = element_matrices(dx, dy, dz);
    let x0 = unit_strain_displacements(dx, dy, dz);

    let lame_solid = materials.solid.lame();
    let lame_void = materials.void.lame();
    let lame: Vec<(f64, f64)> = solid
        .iter()
        .map(|&s| if s { lame_solid } else { lame_void })
        .collect();

    let mesh = PeriodicMesh::new(dims);
    let (k, rhs) = assemble(&mesh, &em, &lame);
    debug!(dofs = mesh.dof_count(), nnz = k.nnz(), "system assembled");

    // The six load cases are independent; solve them in parallel.
    let columns: Vec<DVector<f64>> = (0..6).map(|c| rhs.column(c).clone_owned()).collect();
    let solutions: Vec<DVector<f64>> = match params.method {
        SolverMethod::ConjugateGradient => {
            let m_inv = inverse_diagonal(&k);
            columns
                .par_iter()
                .map(|b| solve_pcg(&k, b, &m_inv, params.tolerance, params.max_iterations))
                .collect::<HomogenizationResult<Vec<_>>>()?
        }
        SolverMethod::Direct => {
            let dense = to_dense(&k);
            columns
                .par_iter()
                .map(|b| solve_direct(&dense, b))
                .collect::<HomogenizationResult<Vec<_>>>()?
        }
    };

    // Strain-energy assembly of the effective tensor.
    let volume = cell_size[0] * cell_size[1] * cell_size[2];
    let mut ch = Matrix6::<f64>::zeros();
    for ez in 0..nelz {
        for ey in 0..nely {
            for ex in 0..nelx {
                let e = ex + ey * nelx + ez * nelx * nely;
                let (lambda, mu) = lame[e];
                let ke = lambda * em.ke_lambda + mu * em.ke_mu;
                let dofs = mesh.element_dofs(ex, ey, ez);

                let mut d = SMatrix::<f64, 24, 6>::zeros();
                for (a, &dof) in dofs.iter().enumerate() {
                    for c in 0..6 {
                        d[(a, c)] = x0[(a, c)] - solutions[c][dof];
                    }
                }
                ch += d.transpose() * ke * d;
            }
        }
    }
    ch /= volume;

    Ok(StiffnessTensor::from_matrix(ch))
}

/// Homogenize, converting any failure into the all-NaN sentinel.
///
/// This is the boundary for NaN-tolerant consumers: homogenization failure
/// must never abort the calling workflow.
#[must_use]
pub fn homogenize_or_nan(
    cell_size: [f64; 3],
    materials: &MaterialPair,
    solid: &[bool],
    dims: (usize, usize, usize),
    params: &HomogenizationParams,
) -> StiffnessTensor {
    match homogenize(cell_size, materials, solid, dims, params) {
        Ok(ch) => ch,
        Err(error) => {
            warn!(%error, "homogenization failed, returning NaN stiffness");
            StiffnessTensor::nan()
        }
    }
}

fn validate(
    cell_size: [f64; 3],
    materials: &MaterialPair,
    solid: &[bool],
    dims: (usize, usize, usize),
) -> HomogenizationResult<()> {
    if cell_size.iter().any(|&l| !(l > 0.0 && l.is_finite())) {
        return Err(HomogenizationError::InvalidCellSize(cell_size));
    }
    let expected = dims.0 * dims.1 * dims.2;
    if solid.len() != expected || expected == 0 {
        return Err(HomogenizationError::MaskSizeMismatch {
            got: solid.len(),
            expected,
            dims,
        });
    }
    if !solid.iter().any(|&s| s) {
        return Err(HomogenizationError::EmptySolidMask);
    }
    for material in [&materials.solid, &materials.void] {
        if !material.is_valid() {
            return Err(HomogenizationError::InvalidMaterial {
                youngs_modulus: material.youngs_modulus,
                poisson_ratio: material.poisson_ratio,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cell_types::IsotropicMaterial;

    fn single_material() -> MaterialPair {
        // Identical phases: the mask should not matter.
        let m = IsotropicMaterial::new(1.0, 0.3);
        MaterialPair::new(m, m)
    }

    #[test]
    fn fully_solid_cube_recovers_isotropic_stiffness() {
        let materials = single_material();
        let (lambda, mu) = materials.solid.lame();
        let reference = StiffnessTensor::isotropic(lambda, mu);

        for method in [HomogenizationParams::default(), HomogenizationParams::direct()] {
            let ch = homogenize([1.0, 1.0, 1.0], &materials, &vec![true; 27], (3, 3, 3), &method)
                .expect("solves");

            assert!(ch.is_symmetric(1e-9));
            for i in 0..6 {
                for j in 0..6 {
                    assert_relative_eq!(
                        ch.get(i, j),
                        reference.get(i, j),
                        epsilon = 1e-8,
                        max_relative = 1e-8
                    );
                }
            }
        }
    }

    #[test]
    fn fully_void_mask_is_nan_not_panic() {
        let materials = single_material();
        let ch = homogenize_or_nan(
            [1.0, 1.0, 1.0],
            &materials,
            &vec![false; 8],
            (2, 2, 2),
            &HomogenizationParams::default(),
        );
        assert!(ch.is_nan());
    }

    #[test]
    fn empty_mask_is_error() {
        let materials = single_material();
        let result = homogenize(
            [1.0, 1.0, 1.0],
            &materials,
            &vec![false; 8],
            (2, 2, 2),
            &HomogenizationParams::default(),
        );
        assert!(matches!(result, Err(HomogenizationError::EmptySolidMask)));
    }

    #[test]
    fn invalid_material_rejected() {
        let bad = MaterialPair::new(
            IsotropicMaterial::new(-1.0, 0.3),
            IsotropicMaterial::new(1.0, 0.3),
        );
        let result = homogenize(
            [1.0, 1.0, 1.0],
            &bad,
            &vec![true; 8],
            (2, 2, 2),
            &HomogenizationParams::default(),
        );
        assert!(matches!(
            result,
            Err(HomogenizationError::InvalidMaterial { .. })
        ));
    }

    #[test]
    fn mask_dims_mismatch_rejected() {
        let materials = single_material();
        let result = homogenize(
            [1.0, 1.0, 1.0],
            &materials,
            &vec![true; 7],
            (2, 2, 2),
            &HomogenizationParams::default(),
        );
        assert!(matches!(
            result,
            Err(HomogenizationError::MaskSizeMismatch { .. })
        ));
    }

    #[test]
    fn porous_cell_is_softer_and_symmetric() {
        let materials = MaterialPair::with_void_contrast(IsotropicMaterial::new(1.0, 0.3), 1e-6);
        let (lambda, mu) = materials.solid.lame();

        // 2x2x2 cell with one voxel removed.
        let mut solid = vec![true; 8];
        solid[0] = false;

        let ch = homogenize(
            [1.0, 1.0, 1.0],
            &materials,
            &solid,
            (2, 2, 2),
            &HomogenizationParams::default().with_tolerance(1e-10),
        )
        .expect("solves");

        assert!(ch.is_symmetric(1e-6));
        // Softer than bulk, stiffer than nothing.
        assert!(ch.get(0, 0) > 0.0);
        assert!(ch.get(0, 0) < lambda + 2.0 * mu);
    }

    #[test]
    fn cg_and_direct_agree_on_porous_cell() {
        let materials = MaterialPair::with_void_contrast(IsotropicMaterial::new(1.0, 0.25), 1e-6);
        let mut solid = vec![true; 27];
        solid[13] = false; // center voxel removed

        let cg = homogenize(
            [1.0, 1.0, 1.0],
            &materials,
            &solid,
            (3, 3, 3),
            &HomogenizationParams::default().with_tolerance(1e-12),
        )
        .expect("cg solves");
        let lu = homogenize(
            [1.0, 1.0, 1.0],
            &materials,
            &solid,
            (3, 3, 3),
            &HomogenizationParams::direct(),
        )
        .expect("lu solves");

        for i in 0..6 {
            for j in 0..6 {
                assert_relative_eq!(cg.get(i, j), lu.get(i, j), epsilon = 1e-6);
            }
        }
    }
}
