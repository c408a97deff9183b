//! Error types for grid construction.

use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur constructing or transforming a grid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// The voxel size is non-positive or non-finite.
    #[error("voxel size must be positive and finite, got {0}")]
    InvalidVoxelSize(f64),

    /// The bounding box is degenerate (min >= max in some dimension).
    #[error("invalid bounding box: min {min:?} >= max {max:?} in at least one dimension")]
    InvalidBounds {
        /// Minimum corner of the bounds.
        min: [f64; 3],
        /// Maximum corner of the bounds.
        max: [f64; 3],
    },

    /// The pose's linear part is not invertible.
    #[error("pose transform is singular and cannot map into sampling space")]
    SingularPose,
}
