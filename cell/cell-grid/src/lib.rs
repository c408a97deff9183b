//! Regular 3D sampling grid shared by all VoxCell components.
//!
//! The [`UnitCellGrid`] defines the voxel lattice (bounds, voxel size,
//! per-axis coordinate sequences) on which scalar fields are sampled,
//! properties are evaluated, and the homogenization mesh is built. The
//! [`Pose`] transform maps grid coordinates into the sampling space used by
//! implicit generators, so a unit cell can be instantiated at arbitrary
//! scale, rotation, and placement without changing its defining equation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod grid;
mod pose;

pub use error::{GridError, GridResult};
pub use grid::UnitCellGrid;
pub use pose::Pose;
