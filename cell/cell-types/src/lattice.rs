//! Strut lattice collaborator data.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A strut lattice: node centers connected by cylindrical struts.
///
/// This is the in-process contract for lattice collaborators (e.g. a
/// node/strut list parsed elsewhere). Strut endpoints index into `nodes`
/// (0-based internally; use [`StrutLattice::from_one_based`] for 1-based
/// input).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrutLattice {
    /// Node center coordinates.
    pub nodes: Vec<Point3<f64>>,
    /// Struts as pairs of node indices (0-based).
    pub struts: Vec<[u32; 2]>,
    /// Radius of each strut cylinder.
    pub strut_radius: f64,
    /// Radius of the dilated sphere at each node.
    pub node_radius: f64,
}

impl StrutLattice {
    /// Create a lattice from nodes, 0-based struts, and radii.
    #[must_use]
    pub fn new(
        nodes: Vec<Point3<f64>>,
        struts: Vec<[u32; 2]>,
        strut_radius: f64,
        node_radius: f64,
    ) -> Self {
        Self {
            nodes,
            struts,
            strut_radius,
            node_radius,
        }
    }

    /// Create a lattice from 1-based strut indices.
    #[must_use]
    pub fn from_one_based(
        nodes: Vec<Point3<f64>>,
        struts: &[[u32; 2]],
        strut_radius: f64,
        node_radius: f64,
    ) -> Self {
        let struts = struts
            .iter()
            .map(|s| [s[0].saturating_sub(1), s[1].saturating_sub(1)])
            .collect();
        Self::new(nodes, struts, strut_radius, node_radius)
    }

    /// Check whether the lattice has no nodes or no struts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.struts.is_empty()
    }

    /// Endpoints of a strut, or `None` if any index is out of range.
    #[must_use]
    pub fn strut_endpoints(&self, strut: usize) -> Option<(Point3<f64>, Point3<f64>)> {
        let s = self.struts.get(strut)?;
        Some((
            *self.nodes.get(s[0] as usize)?,
            *self.nodes.get(s[1] as usize)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_strut() -> StrutLattice {
        StrutLattice::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![[0, 1]],
            0.1,
            0.15,
        )
    }

    #[test]
    fn empty_lattice() {
        assert!(StrutLattice::default().is_empty());
        assert!(!single_strut().is_empty());
    }

    #[test]
    fn one_based_conversion() {
        let lattice = StrutLattice::from_one_based(single_strut().nodes, &[[1, 2]], 0.1, 0.15);
        assert_eq!(lattice.struts[0], [0, 1]);
    }

    #[test]
    fn strut_endpoints_lookup() {
        let lattice = single_strut();
        let (a, b) = lattice.strut_endpoints(0).expect("strut exists");
        assert!((a.x - 0.0).abs() < f64::EPSILON);
        assert!((b.x - 1.0).abs() < f64::EPSILON);
        assert!(lattice.strut_endpoints(1).is_none());
    }
}
