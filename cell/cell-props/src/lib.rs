//! Derived per-voxel and per-slice properties of cellular-structure fields.
//!
//! Properties are populated lazily into a [`PropertyMap`], only when
//! requested:
//!
//! - **Orientation** ([`orientation`]): azimuth and inclination of the
//!   local surface normal from a smoothed Sobel gradient of `U`
//! - **Curvature** ([`curvature`]): principal, mean, and Gaussian curvature
//!   via implicit-surface differential geometry; requires the
//!   implicit-function collaborator and is simply absent otherwise
//! - **Build risk** ([`build_risk`]): a layer-wise manufacturability
//!   heuristic from an anisotropic convolution against the solid mask
//! - **Slice metrics** ([`slice_metrics`]): per-layer maximum local
//!   thickness and cross-sectional area under periodic wrap
//!
//! Downstream consumers must treat NaN values and absent map entries as a
//! valid "not computed" state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod curvature;
mod error;
mod filter;
mod map;
mod orientation;
mod risk;
mod slices;

pub use curvature::{curvature, CurvatureParams};
pub use error::{PropertyError, PropertyResult};
pub use map::{PropertyKind, PropertyMap};
pub use orientation::{orientation, OrientationParams};
pub use risk::{build_risk, BuildRiskParams};
pub use slices::{slice_metrics, SliceMetrics};
