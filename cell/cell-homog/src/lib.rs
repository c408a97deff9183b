//! Periodic homogenization of voxel microstructures.
//!
//! Given the solid/void voxel mask of a periodic unit cell and two
//! isotropic material definitions, this crate assembles a discretized
//! periodic linear-elasticity problem (one trilinear hexahedral element per
//! voxel) and solves the six canonical unit macroscopic strain load cases
//! under periodic boundary conditions. The strain-energy products of the
//! corrector displacements assemble the effective 6x6 stiffness tensor in
//! Voigt order `[xx, yy, zz, yz, xz, xy]`.
//!
//! The linear system per load case is sparse, symmetric, and positive
//! semi-definite; it is solved with a Jacobi-preconditioned conjugate
//! gradient by default (a dense direct solve is selectable for small
//! cells). Internal logic is `Result`-typed and validates preconditions
//! before assembling; the all-NaN 6x6 sentinel expected by NaN-tolerant
//! consumers exists only at the [`homogenize_or_nan`] boundary.
//!
//! # Example
//!
//! ```
//! use cell_homog::{homogenize, HomogenizationParams};
//! use cell_types::{IsotropicMaterial, MaterialPair};
//!
//! let materials = MaterialPair::with_void_contrast(
//!     IsotropicMaterial::new(1.0, 0.3),
//!     1e-9,
//! );
//! let solid = vec![true; 8];
//! let ch = homogenize(
//!     [1.0, 1.0, 1.0],
//!     &materials,
//!     &solid,
//!     (2, 2, 2),
//!     &HomogenizationParams::default(),
//! ).unwrap();
//! assert!(ch.get(0, 0) > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod assembly;
mod element;
mod error;
mod homogenize;
mod params;
mod solver;
mod stiffness;

pub use error::{HomogenizationError, HomogenizationResult};
pub use homogenize::{homogenize, homogenize_or_nan};
pub use params::{HomogenizationParams, SolverMethod};
pub use stiffness::StiffnessTensor;
