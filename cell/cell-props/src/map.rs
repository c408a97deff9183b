//! Typed property storage.

use hashbrown::HashMap;

/// The well-known per-voxel properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PropertyKind {
    /// Azimuth of the surface normal, degrees.
    Azimuth,
    /// Inclination of the surface normal (90° + elevation), degrees.
    Inclination,
    /// Smaller principal curvature.
    PrincipalMin,
    /// Larger principal curvature.
    PrincipalMax,
    /// Mean curvature.
    MeanCurvature,
    /// Gaussian curvature.
    GaussianCurvature,
    /// Layer-wise build risk (NaN on void voxels).
    BuildRisk,
}

impl PropertyKind {
    /// Name of this property.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Azimuth => "azimuth",
            Self::Inclination => "inclination",
            Self::PrincipalMin => "principal_min",
            Self::PrincipalMax => "principal_max",
            Self::MeanCurvature => "mean_curvature",
            Self::GaussianCurvature => "gaussian_curvature",
            Self::BuildRisk => "build_risk",
        }
    }
}

/// A lazily populated mapping from property kind to a per-voxel array.
///
/// Arrays share the owning field's grid shape and linear order. An absent
/// entry means the property was not computed (e.g. curvature without an
/// implicit-function collaborator) — a valid state, not an error.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    inner: HashMap<PropertyKind, Vec<f64>>,
}

impl PropertyMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a property array, replacing any previous values.
    pub fn insert(&mut self, kind: PropertyKind, values: Vec<f64>) {
        self.inner.insert(kind, values);
    }

    /// Look up a property array.
    #[must_use]
    pub fn get(&self, kind: PropertyKind) -> Option<&[f64]> {
        self.inner.get(&kind).map(Vec::as_slice)
    }

    /// Whether a property has been computed.
    #[must_use]
    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.inner.contains_key(&kind)
    }

    /// Iterate over the computed property kinds.
    pub fn kinds(&self) -> impl Iterator<Item = PropertyKind> + '_ {
        self.inner.keys().copied()
    }

    /// Number of computed properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no properties have been computed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
