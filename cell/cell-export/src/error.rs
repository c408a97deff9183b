//! Error types for mesh export.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur during export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The mesh has no elements to write.
    #[error("hex mesh is empty, nothing to export")]
    EmptyMesh,

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
