//! Isotropic linear-elastic material definitions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An isotropic linear-elastic material.
///
/// Defined by Young's modulus and Poisson ratio; the Lamé parameters used by
/// the homogenization solver are derived via the standard isotropic
/// elasticity relations.
///
/// # Example
///
/// ```
/// use cell_types::IsotropicMaterial;
///
/// let steel = IsotropicMaterial::new(210e9, 0.3);
/// let (lambda, mu) = steel.lame();
/// assert!(lambda > 0.0 && mu > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsotropicMaterial {
    /// Young's modulus (stiffness), in consistent stress units.
    pub youngs_modulus: f64,
    /// Poisson ratio, physically meaningful in (-1, 0.5).
    pub poisson_ratio: f64,
}

impl IsotropicMaterial {
    /// Create a material from Young's modulus and Poisson ratio.
    #[must_use]
    pub const fn new(youngs_modulus: f64, poisson_ratio: f64) -> Self {
        Self {
            youngs_modulus,
            poisson_ratio,
        }
    }

    /// Lamé parameters `(lambda, mu)`.
    ///
    /// `lambda = E*v / ((1+v)(1-2v))`, `mu = E / (2+2v)`.
    #[must_use]
    pub fn lame(&self) -> (f64, f64) {
        let e = self.youngs_modulus;
        let v = self.poisson_ratio;
        let lambda = e * v / ((1.0 + v) * (1.0 - 2.0 * v));
        let mu = e / (2.0 + 2.0 * v);
        (lambda, mu)
    }

    /// Whether the material parameters are physically valid.
    ///
    /// Requires a positive modulus and a Poisson ratio strictly inside
    /// (-1, 0.5), where the Lamé conversion is well defined.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.youngs_modulus > 0.0
            && self.poisson_ratio > -1.0
            && self.poisson_ratio < 0.5
            && self.youngs_modulus.is_finite()
    }
}

/// The two candidate materials mapped onto the binary solid mask.
///
/// `solid` is assigned to voxels where the field is solid, `void` to the
/// complementary phase (often a near-zero-stiffness filler).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialPair {
    /// Material of the solid phase.
    pub solid: IsotropicMaterial,
    /// Material of the void phase.
    pub void: IsotropicMaterial,
}

impl MaterialPair {
    /// Create a pair from solid and void materials.
    #[must_use]
    pub const fn new(solid: IsotropicMaterial, void: IsotropicMaterial) -> Self {
        Self { solid, void }
    }

    /// A single-material pair with a compliant void phase.
    ///
    /// The void modulus is scaled down by `contrast` (e.g. `1e-9`), the
    /// usual treatment when homogenizing a solid/air microstructure.
    #[must_use]
    pub fn with_void_contrast(solid: IsotropicMaterial, contrast: f64) -> Self {
        Self {
            solid,
            void: IsotropicMaterial::new(solid.youngs_modulus * contrast, solid.poisson_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lame_conversion() {
        // E = 1, v = 0.3: lambda = 0.3/(1.3*0.4), mu = 1/2.6
        let material = IsotropicMaterial::new(1.0, 0.3);
        let (lambda, mu) = material.lame();
        assert_relative_eq!(lambda, 0.3 / (1.3 * 0.4), epsilon = 1e-12);
        assert_relative_eq!(mu, 1.0 / 2.6, epsilon = 1e-12);
    }

    #[test]
    fn zero_poisson() {
        let material = IsotropicMaterial::new(2.0, 0.0);
        let (lambda, mu) = material.lame();
        assert_relative_eq!(lambda, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mu, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn validity() {
        assert!(IsotropicMaterial::new(1.0, 0.3).is_valid());
        assert!(!IsotropicMaterial::new(0.0, 0.3).is_valid());
        assert!(!IsotropicMaterial::new(1.0, 0.5).is_valid());
        assert!(!IsotropicMaterial::new(-1.0, 0.3).is_valid());
    }

    #[test]
    fn void_contrast() {
        let pair = MaterialPair::with_void_contrast(IsotropicMaterial::new(1.0, 0.3), 1e-9);
        assert_relative_eq!(pair.void.youngs_modulus, 1e-9, epsilon = 1e-21);
        assert_relative_eq!(pair.void.poisson_ratio, 0.3, epsilon = 1e-12);
    }
}
