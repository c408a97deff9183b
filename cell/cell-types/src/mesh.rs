//! Indexed triangle mesh collaborator.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;

/// An indexed triangle surface mesh.
///
/// This is the in-process contract for mesh collaborators: `vertices` are
/// world-space coordinates and `faces` index into them (0-based internally;
/// use [`TriMesh::from_one_based`] for collaborators that supply 1-based
/// indices).
///
/// # Example
///
/// ```
/// use cell_types::{Point3, TriMesh};
///
/// let mesh = TriMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriMesh {
    /// Vertex coordinates.
    pub vertices: Vec<Point3<f64>>,
    /// Triangle faces as vertex indices (0-based).
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and 0-based faces.
    #[must_use]
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from vertices and 1-based faces.
    ///
    /// Lattice and region collaborators supply 1-based face lists; this
    /// converts them to the internal 0-based convention. Zero indices are
    /// clamped rather than wrapped, so malformed input degrades to a
    /// degenerate face instead of an out-of-range panic.
    #[must_use]
    pub fn from_one_based(vertices: Vec<Point3<f64>>, faces: &[[u32; 3]]) -> Self {
        let faces = faces
            .iter()
            .map(|f| [f[0].saturating_sub(1), f[1].saturating_sub(1), f[2].saturating_sub(1)])
            .collect();
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no vertices or no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Get the three corner points of a face.
    ///
    /// Returns `None` if the face index or any vertex index is out of range.
    #[must_use]
    pub fn triangle(&self, face: usize) -> Option<[Point3<f64>; 3]> {
        let f = self.faces.get(face)?;
        Some([
            *self.vertices.get(f[0] as usize)?,
            *self.vertices.get(f[1] as usize)?,
            *self.vertices.get(f[2] as usize)?,
        ])
    }

    /// Bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}
