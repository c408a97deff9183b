//! Error types for property evaluation.

use cell_grid::GridError;
use thiserror::Error;

/// Result type for property operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Errors that can occur during property evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropertyError {
    /// Grid or pose error (e.g. a singular pose passed to curvature).
    #[error(transparent)]
    Grid(#[from] GridError),
}
