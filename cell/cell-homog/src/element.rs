//! Trilinear hexahedral element matrices.
//!
//! Each voxel is one 8-node brick element. The stiffness and unit-strain
//! load matrices are split into their lambda and mu parts so per-element
//! material selection is a cheap linear combination.

use nalgebra::{Matrix6, SMatrix};

/// Local node positions in natural coordinates, `(xi, eta, zeta)` signs.
///
/// Bottom ring counterclockwise, then the top ring; the periodic assembly
/// uses the same corner order.
pub(crate) const NODE_SIGNS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Element matrices split by Lamé parameter.
#[derive(Debug, Clone)]
pub(crate) struct ElementMatrices {
    /// Stiffness contribution scaled by lambda.
    pub ke_lambda: SMatrix<f64, 24, 24>,
    /// Stiffness contribution scaled by mu.
    pub ke_mu: SMatrix<f64, 24, 24>,
    /// Unit-strain load contribution scaled by lambda.
    pub fe_lambda: SMatrix<f64, 24, 6>,
    /// Unit-strain load contribution scaled by mu.
    pub fe_mu: SMatrix<f64, 24, 6>,
}

/// Integrate the element matrices for a brick of size `dx x dy x dz`.
///
/// 2x2x2 Gauss quadrature; Voigt order `[xx, yy, zz, yz, xz, xy]` with
/// engineering shear strains.
pub(crate) fn element_matrices(dx: f64, dy: f64, dz: f64) -> ElementMatrices {
    const GP: f64 = 0.577_350_269_189_625_8; // 1/sqrt(3)

    // Constitutive split: C = lambda * C_l + mu * C_m.
    let mut c_lambda = Matrix6::<f64>::zeros();
    for i in 0..3 {
        for j in 0..3 {
            c_lambda[(i, j)] = 1.0;
        }
    }
    let c_mu = Matrix6::<f64>::from_diagonal(&nalgebra::Vector6::new(
        2.0, 2.0, 2.0, 1.0, 1.0, 1.0,
    ));

    let mut ke_lambda = SMatrix::<f64, 24, 24>::zeros();
    let mut ke_mu = SMatrix::<f64, 24, 24>::zeros();
    let mut fe_lambda = SMatrix::<f64, 24, 6>::zeros();
    let mut fe_mu = SMatrix::<f64, 24, 6>::zeros();

    // Jacobian is diagonal for an axis-aligned brick.
    let det = dx * dy * dz / 8.0;

    for &gx in &[-GP, GP] {
        for &gy in &[-GP, GP] {
            for &gz in &[-GP, GP] {
                let b = strain_displacement(dx, dy, dz, gx, gy, gz);
                let bt = b.transpose();

                ke_lambda += det * bt * c_lambda * b;
                ke_mu += det * bt * c_mu * b;
                // Unit macroscopic strains are the six identity columns,
                // so fe = integral of B^T C.
                fe_lambda += det * bt * c_lambda;
                fe_mu += det * bt * c_mu;
            }
        }
    }

    ElementMatrices {
        ke_lambda,
        ke_mu,
        fe_lambda,
        fe_mu,
    }
}

/// The 6x24 strain-displacement matrix at a Gauss point.
fn strain_displacement(
    dx: f64,
    dy: f64,
    dz: f64,
    gx: f64,
    gy: f64,
    gz: f64,
) -> SMatrix<f64, 6, 24> {
    let mut b = SMatrix::<f64, 6, 24>::zeros();

    for (a, signs) in NODE_SIGNS.iter().enumerate() {
        let [sx, sy, sz] = *signs;
        let dn_dx = 0.125 * sx * (1.0 + sy * gy) * (1.0 + sz * gz) * 2.0 / dx;
        let dn_dy = 0.125 * sy * (1.0 + sx * gx) * (1.0 + sz * gz) * 2.0 / dy;
        let dn_dz = 0.125 * sz * (1.0 + sx * gx) * (1.0 + sy * gy) * 2.0 / dz;

        let (cx, cy, cz) = (3 * a, 3 * a + 1, 3 * a + 2);
        b[(0, cx)] = dn_dx;
        b[(1, cy)] = dn_dy;
        b[(2, cz)] = dn_dz;
        // Engineering shears.
        b[(3, cy)] = dn_dz;
        b[(3, cz)] = dn_dy;
        b[(4, cx)] = dn_dz;
        b[(4, cz)] = dn_dx;
        b[(5, cx)] = dn_dy;
        b[(5, cy)] = dn_dx;
    }

    b
}

/// Node displacements of the six unit macroscopic strain states.
///
/// The affine field `u = eps * x` (with half shears off-diagonal) is exact
/// for trilinear elements; any rigid-mode representative gives the same
/// strain energy.
pub(crate) fn unit_strain_displacements(dx: f64, dy: f64, dz: f64) -> SMatrix<f64, 24, 6> {
    // Symmetric strain tensors for the Voigt cases, row-major.
    let cases: [[[f64; 3]; 3]; 6] = [
        [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
        [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        [[0.0, 0.0, 0.0], [0.0, 0.0, 0.5], [0.0, 0.5, 0.0]],
        [[0.0, 0.0, 0.5], [0.0, 0.0, 0.0], [0.5, 0.0, 0.0]],
        [[0.0, 0.5, 0.0], [0.5, 0.0, 0.0], [0.0, 0.0, 0.0]],
    ];

    let mut x0 = SMatrix::<f64, 24, 6>::zeros();
    for (a, signs) in NODE_SIGNS.iter().enumerate() {
        let p = [
            (signs[0] + 1.0) * 0.5 * dx,
            (signs[1] + 1.0) * 0.5 * dy,
            (signs[2] + 1.0) * 0.5 * dz,
        ];
        for (c, eps) in cases.iter().enumerate() {
            for d in 0..3 {
                x0[(3 * a + d, c)] = eps[d][0] * p[0] + eps[d][1] * p[1] + eps[d][2] * p[2];
            }
        }
    }
    x0
}
