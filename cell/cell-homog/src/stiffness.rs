//! The effective stiffness tensor.

use nalgebra::Matrix6;

/// Homogenized 6x6 stiffness of the periodic unit cell, Voigt order
/// `[xx, yy, zz, yz, xz, xy]`.
///
/// An all-NaN tensor is the sentinel for a failed solve (see
/// [`crate::homogenize_or_nan`]); consumers must treat it as "not
/// computed", not as zero stiffness.
#[derive(Debug, Clone, PartialEq)]
pub struct StiffnessTensor(Matrix6<f64>);

impl StiffnessTensor {
    /// Wrap a 6x6 matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix6<f64>) -> Self {
        Self(matrix)
    }

    /// The all-NaN failure sentinel.
    #[must_use]
    pub fn nan() -> Self {
        Self(Matrix6::from_element(f64::NAN))
    }

    /// Closed-form stiffness of a bulk isotropic material.
    ///
    /// Useful as the reference for a fully solid single-material cell.
    #[must_use]
    pub fn isotropic(lambda: f64, mu: f64) -> Self {
        let mut m = Matrix6::zeros();
        for i in 0..3 {
            for j in 0..3 {
                m[(i, j)] = lambda;
            }
            m[(i, i)] = lambda + 2.0 * mu;
            m[(i + 3, i + 3)] = mu;
        }
        Self(m)
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix6<f64> {
        &self.0
    }

    /// Entry accessor.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0[(i, j)]
    }

    /// Whether every entry is NaN (the failure sentinel).
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0.iter().all(|v| v.is_nan())
    }

    /// Whether the tensor is symmetric within an absolute tolerance.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        for i in 0..6 {
            for j in (i + 1)..6 {
                if (self.0[(i, j)] - self.0[(j, i)]).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }
}

impl std::fmt::Display for StiffnessTensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Effective stiffness (Voigt [xx, yy, zz, yz, xz, xy]):")?;
        for i in 0..6 {
            write!(f, " ")?;
            for j in 0..6 {
                write!(f, " {:>12.5e}", self.0[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
