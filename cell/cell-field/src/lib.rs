//! Volumetric scalar field engine for periodic cellular structures.
//!
//! This crate builds a regular-grid scalar field `U` (signed-distance-like;
//! `U <= 0` is solid, `U > 0` is void) from one of several generator kinds:
//!
//! - **TPMS**: periodic trigonometric implicit equations (gyroid,
//!   Schwarz-P, diamond, ...) in network or sheet phase, with optional
//!   graded offset fields for heterogeneous unit cells
//! - **Triangle mesh**: periodic surface rasterization, interior fill, and
//!   an exact Euclidean distance transform to a true signed-distance field
//! - **Strut lattice**: signed distance to a union of capped cylinders and
//!   node spheres
//! - **Raw values** and **image stacks** resampled under a pose transform
//!
//! Fields can be clipped against a bounding [`Region`] (box, cylinder, or
//! boundary mesh), which takes the pointwise maximum with an
//! outside-region penalty field.
//!
//! # Quick Start
//!
//! ```
//! use cell_field::{generate, Generator, TpmsKind, TpmsParams};
//! use cell_grid::{Pose, UnitCellGrid};
//! use cell_types::{Aabb, Point3};
//!
//! let grid = UnitCellGrid::new(
//!     Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
//!     0.05,
//! ).unwrap();
//! let field = generate(
//!     grid,
//!     &Pose::identity(),
//!     &Generator::Tpms(TpmsParams::network(TpmsKind::Gyroid, 0.0)),
//! ).unwrap();
//! assert!(field.relative_density() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod distance;
mod error;
mod field;
mod generator;
mod graded;
mod lattice;
mod raster;
mod region;
mod tpms;
mod volume;

pub use error::{FieldError, FieldResult};
pub use field::ScalarField;
pub use generator::{generate, Generator};
pub use graded::GradedOffset;
pub use region::Region;
pub use tpms::{IsoCalibration, TpmsKind, TpmsParams, TpmsPhase};
pub use volume::VolumeData;
