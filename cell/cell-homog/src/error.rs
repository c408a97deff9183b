//! Error types for homogenization.

use thiserror::Error;

/// Result type for homogenization operations.
pub type HomogenizationResult<T> = Result<T, HomogenizationError>;

/// Errors that can occur during homogenization.
///
/// These are validated preconditions and solver outcomes, not caught
/// exceptions; [`crate::homogenize_or_nan`] converts any of them into the
/// all-NaN sentinel for legacy consumers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HomogenizationError {
    /// The solid mask contains no solid voxel.
    #[error("solid mask is empty, nothing to homogenize")]
    EmptySolidMask,

    /// A material has a non-positive modulus or out-of-range Poisson
    /// ratio.
    #[error("invalid material: E = {youngs_modulus}, v = {poisson_ratio}")]
    InvalidMaterial {
        /// Young's modulus of the offending material.
        youngs_modulus: f64,
        /// Poisson ratio of the offending material.
        poisson_ratio: f64,
    },

    /// The mask length does not match the voxel dimensions.
    #[error("mask has {got} entries, expected {expected} for dims {dims:?}")]
    MaskSizeMismatch {
        /// Entries supplied.
        got: usize,
        /// Entries required.
        expected: usize,
        /// Voxel dimensions for reference.
        dims: (usize, usize, usize),
    },

    /// A unit-cell edge length is non-positive.
    #[error("unit-cell edge lengths must be positive, got {0:?}")]
    InvalidCellSize([f64; 3]),

    /// The conjugate gradient ran out of iterations.
    #[error("conjugate gradient did not converge after {iterations} iterations (relative residual {residual:.3e})")]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Final relative residual.
        residual: f64,
    },

    /// The direct solve met a singular system matrix.
    #[error("direct solve failed: system matrix is singular")]
    SingularSystem,
}
