//! Hexahedral finite-element export of voxel solid masks.
//!
//! Converts a scalar field's solid mask into a node/element connectivity
//! list (one 8-node brick per solid voxel) and writes it in an
//! Abaqus-style `.inp` format for third-party structural solvers.
//!
//! Node numbering is global over the corner lattice and 1-based; only
//! nodes referenced by at least one solid element are emitted.
//!
//! # Example
//!
//! ```
//! use cell_export::build_hex_mesh;
//! use cell_field::ScalarField;
//! use cell_grid::UnitCellGrid;
//! use cell_types::{Aabb, Point3};
//!
//! let grid = UnitCellGrid::new(
//!     Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
//!     0.5,
//! ).unwrap();
//! let n = grid.len();
//! let field = ScalarField::from_values(grid, vec![-1.0; n]).unwrap();
//!
//! let mesh = build_hex_mesh(&field);
//! assert_eq!(mesh.element_count(), 27);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod hex;
mod inp;

pub use error::{ExportError, ExportResult};
pub use hex::{build_hex_mesh, HexMesh};
pub use inp::{save_inp, write_inp};
