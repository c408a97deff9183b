//! Shared leaf types for the VoxCell cellular-structure toolkit.
//!
//! This crate provides the data types exchanged between the grid model,
//! field generator, property evaluator, homogenization solver, and export
//! adapter:
//!
//! - [`Aabb`] - axis-aligned bounding box
//! - [`TriMesh`] - indexed triangle mesh collaborator (vertices + faces)
//! - [`IsotropicMaterial`] / [`MaterialPair`] - linear-elastic material
//!   definitions and their Lamé parameters
//! - [`StrutLattice`] - node/strut lattice collaborator data
//!
//! # Layer 0 Crate
//!
//! No dependencies beyond nalgebra (and optional serde). It can be used in
//! CLI tools, servers, and other front ends without pulling in the heavier
//! field or solver crates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod lattice;
mod material;
mod mesh;

pub use bounds::Aabb;
pub use lattice::StrutLattice;
pub use material::{IsotropicMaterial, MaterialPair};
pub use mesh::TriMesh;

// Re-export the math types used throughout the workspace so downstream
// crates can name them without importing nalgebra directly.
pub use nalgebra::{Matrix3, Point3, Vector3};
