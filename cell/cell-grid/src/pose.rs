//! Pose transform between world space and sampling space.

use nalgebra::{Matrix3, Point3, Vector3};

use crate::error::{GridError, GridResult};

/// An affine pose: a 3x3 linear part (scale/rotation/shear) plus a
/// translation.
///
/// The pose maps sampling-space coordinates into world space,
/// `x = L * s + t`. Implicit generators evaluate in sampling space, so the
/// grid applies the pose *inverse* to its world coordinates before
/// evaluation; curvature differentiation maps derivatives through the
/// linear part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Linear part (scale, rotation, shear).
    pub linear: Matrix3<f64>,
    /// Translation part.
    pub translation: Vector3<f64>,
}

impl Pose {
    /// The identity pose (sampling space equals world space).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// A uniform scale pose.
    #[must_use]
    pub fn from_scale(scale: f64) -> Self {
        Self {
            linear: Matrix3::identity() * scale,
            translation: Vector3::zeros(),
        }
    }

    /// A pose from explicit linear and translation parts.
    #[must_use]
    pub const fn from_parts(linear: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            linear,
            translation,
        }
    }

    /// Apply the pose to a point: `L * p + t`.
    #[inline]
    #[must_use]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.linear * point.coords + self.translation)
    }

    /// Invert the pose.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SingularPose`] when the linear part has no
    /// inverse.
    pub fn try_inverse(&self) -> GridResult<Self> {
        let inv = self.linear.try_inverse().ok_or(GridError::SingularPose)?;
        Ok(Self {
            linear: inv,
            translation: -(inv * self.translation),
        })
    }

    /// Isotropic length scale of the linear part, `|det L|^(1/3)`.
    ///
    /// Distances measured in sampling space multiply by this to recover
    /// world-space lengths under a uniform-scale pose.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.linear.determinant().abs().cbrt()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
