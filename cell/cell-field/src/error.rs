//! Error types for field generation.

use cell_grid::GridError;
use thiserror::Error;

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur during field generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FieldError {
    /// A raw value array does not match the grid point count.
    #[error("value array has {got} entries, expected {expected} for grid dims {dims:?}")]
    ValueCountMismatch {
        /// Entries supplied.
        got: usize,
        /// Entries required by the grid.
        expected: usize,
        /// Grid dimensions for reference.
        dims: (usize, usize, usize),
    },

    /// An offset or volume array cannot be broadcast to the grid shape.
    ///
    /// Broadcasting only expands degenerate (length-1) axes; any other
    /// mismatch fails fast rather than silently truncating.
    #[error("array with dims {got:?} cannot broadcast to grid dims {expected:?}")]
    ShapeMismatch {
        /// Dimensions of the supplied array.
        got: (usize, usize, usize),
        /// Target grid dimensions.
        expected: (usize, usize, usize),
    },

    /// A boundary-region mesh has no faces to clip against.
    #[error("boundary-region mesh is empty")]
    EmptyRegionMesh,

    /// Grid or pose error.
    #[error(transparent)]
    Grid(#[from] GridError),
}
