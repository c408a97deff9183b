//! Linear solvers for the load-case systems.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CsrMatrix;

use crate::error::{HomogenizationError, HomogenizationResult};

/// Sparse matrix-vector product `y = A x`.
fn spmv(a: &CsrMatrix<f64>, x: &DVector<f64>, y: &mut DVector<f64>) {
    y.fill(0.0);
    for (i, j, v) in a.triplet_iter() {
        y[i] += v * x[j];
    }
}

/// Inverse diagonal of the system matrix (Jacobi preconditioner).
pub(crate) fn inverse_diagonal(a: &CsrMatrix<f64>) -> DVector<f64> {
    let mut diag = DVector::<f64>::zeros(a.nrows());
    for (i, j, v) in a.triplet_iter() {
        if i == j {
            diag[i] += v;
        }
    }
    diag.map(|d| if d.abs() > f64::EPSILON { 1.0 / d } else { 1.0 })
}

/// Jacobi-preconditioned conjugate gradient.
///
/// A zero right-hand side short-circuits to the zero solution (the uniform
/// material case assembles exactly cancelling loads).
pub(crate) fn solve_pcg(
    a: &CsrMatrix<f64>,
    b: &DVector<f64>,
    m_inv: &DVector<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> HomogenizationResult<DVector<f64>> {
    let n = b.len();
    let b_norm = b.norm();
    if b_norm == 0.0 {
        return Ok(DVector::zeros(n));
    }

    let mut x = DVector::<f64>::zeros(n);
    let mut r = b.clone();
    let mut z = m_inv.component_mul(&r);
    let mut p = z.clone();
    let mut rz = r.dot(&z);
    let mut ap = DVector::<f64>::zeros(n);

    for iteration in 0..max_iterations {
        spmv(a, &p, &mut ap);
        let p_ap = p.dot(&ap);
        if p_ap.abs() < f64::MIN_POSITIVE {
            return Err(HomogenizationError::NotConverged {
                iterations: iteration,
                residual: r.norm() / b_norm,
            });
        }

        let alpha = rz / p_ap;
        x.axpy(alpha, &p, 1.0);
        r.axpy(-alpha, &ap, 1.0);

        let residual = r.norm() / b_norm;
        if residual <= tolerance {
            return Ok(x);
        }

        z = m_inv.component_mul(&r);
        let rz_next = r.dot(&z);
        let beta = rz_next / rz;
        rz = rz_next;
        p = &z + &p * beta;
    }

    Err(HomogenizationError::NotConverged {
        iterations: max_iterations,
        residual: r.norm() / b_norm,
    })
}

/// Dense LU direct solve of one right-hand side.
pub(crate) fn solve_direct(
    dense: &DMatrix<f64>,
    b: &DVector<f64>,
) -> HomogenizationResult<DVector<f64>> {
    dense
        .clone()
        .lu()
        .solve(b)
        .ok_or(HomogenizationError::SingularSystem)
}

/// Expand a sparse matrix to dense storage for the direct solver.
pub(crate) fn to_dense(a: &CsrMatrix<f64>) -> DMatrix<f64> {
    let mut dense = DMatrix::<f64>::zeros(a.nrows(), a.ncols());
    for (i, j, v) in a.triplet_iter() {
        dense[(i, j)] += v;
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra_sparse::CooMatrix;

    /// SPD tridiagonal test matrix.
    fn tridiagonal(n: usize) -> CsrMatrix<f64> {
        let mut coo = CooMatrix::new(n, n);
        for i in 0..n {
            coo.push(i, i, 2.0);
            if i + 1 < n {
                coo.push(i, i + 1, -1.0);
                coo.push(i + 1, i, -1.0);
            }
        }
        CsrMatrix::from(&coo)
    }

    #[test]
    fn pcg_solves_spd_system() {
        let a = tridiagonal(20);
        let x_true = DVector::from_fn(20, |i, _| (i as f64 * 0.37).sin());
        let mut b = DVector::zeros(20);
        spmv(&a, &x_true, &mut b);

        let m_inv = inverse_diagonal(&a);
        let x = solve_pcg(&a, &b, &m_inv, 1e-12, 500).expect("converges");
        for i in 0..20 {
            assert_relative_eq!(x[i], x_true[i], epsilon = 1e-8);
        }
    }

    #[test]
    fn pcg_zero_rhs_is_zero() {
        let a = tridiagonal(10);
        let m_inv = inverse_diagonal(&a);
        let x = solve_pcg(&a, &DVector::zeros(10), &m_inv, 1e-12, 10).expect("trivial");
        assert!(x.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn pcg_reports_non_convergence() {
        let a = tridiagonal(50);
        let b = DVector::from_element(50, 1.0);
        let m_inv = inverse_diagonal(&a);
        let result = solve_pcg(&a, &b, &m_inv, 1e-14, 2);
        assert!(matches!(
            result,
            Err(HomogenizationError::NotConverged { iterations: 2, .. })
        ));
    }

    #[test]
    fn direct_matches_pcg() {
        let a = tridiagonal(15);
        let b = DVector::from_fn(15, |i, _| 1.0 + i as f64);
        let m_inv = inverse_diagonal(&a);

        let x_cg = solve_pcg(&a, &b, &m_inv, 1e-13, 500).expect("converges");
        let x_lu = solve_direct(&to_dense(&a), &b).expect("non-singular");
        for i in 0..15 {
            assert_relative_eq!(x_cg[i], x_lu[i], epsilon = 1e-7);
        }
    }

    #[test]
    fn direct_detects_singular() {
        let mut coo = CooMatrix::new(2, 2);
        coo.push(0, 0, 1.0);
        // Second row is all zeros.
        let a = CsrMatrix::from(&coo);
        let result = solve_direct(&to_dense(&a), &DVector::from_element(2, 1.0));
        assert!(matches!(result, Err(HomogenizationError::SingularSystem)));
    }
}
