//! Signed distance field for strut lattices.

use cell_grid::{Pose, UnitCellGrid};
use cell_types::{Point3, StrutLattice};
use rayon::prelude::*;

use crate::error::FieldResult;

/// Distance from a point to a segment (capped cylinder axis).
fn segment_distance(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < f64::EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Evaluate the lattice signed-distance field on the grid.
///
/// The field is the signed distance to the union of capped cylinders of
/// radius `strut_radius` between node centers, with each node additionally
/// dilated by `node_radius`. Distances are measured in sampling space and
/// scaled back to world units by the pose's isotropic scale factor.
pub(crate) fn lattice_field(
    lattice: &StrutLattice,
    grid: &UnitCellGrid,
    pose: &Pose,
) -> FieldResult<Vec<f64>> {
    let samples = grid.sample_points(pose)?;
    let scale = pose.scale_factor();

    let struts: Vec<(Point3<f64>, Point3<f64>)> = (0..lattice.struts.len())
        .filter_map(|i| lattice.strut_endpoints(i))
        .collect();

    let u = samples
        .par_iter()
        .map(|p| {
            let mut d = f64::INFINITY;
            for (a, b) in &struts {
                d = d.min(segment_distance(p, a, b) - lattice.strut_radius);
            }
            for node in &lattice.nodes {
                d = d.min((p - node).norm() - lattice.node_radius);
            }
            d * scale
        })
        .collect();

    Ok(u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cell_types::Aabb;

    fn grid() -> UnitCellGrid {
        UnitCellGrid::new(
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
            0.1,
        )
        .expect("valid grid")
    }

    #[test]
    fn segment_distance_basics() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        // Beside the middle of the segment.
        assert_relative_eq!(
            segment_distance(&Point3::new(0.5, 0.3, 0.0), &a, &b),
            0.3,
            epsilon = 1e-12
        );
        // Past the cap.
        assert_relative_eq!(
            segment_distance(&Point3::new(1.5, 0.0, 0.0), &a, &b),
            0.5,
            epsilon = 1e-12
        );
        // Degenerate segment falls back to point distance.
        assert_relative_eq!(
            segment_distance(&Point3::new(0.0, 2.0, 0.0), &a, &a),
            2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn single_strut_field() {
        let lattice = StrutLattice::new(
            vec![Point3::new(0.0, 0.5, 0.5), Point3::new(1.0, 0.5, 0.5)],
            vec![[0, 1]],
            0.15,
            0.15,
        );
        let grid = grid();
        let u = lattice_field(&lattice, &grid, &Pose::identity()).expect("field ok");

        // On the strut axis: deep inside.
        assert!(u[grid.index(5, 5, 5)] < 0.0);
        // Far corner: outside.
        assert!(u[grid.index(0, 0, 0)] > 0.0);
        // Exact value at the axis midpoint: -radius.
        assert_relative_eq!(u[grid.index(5, 5, 5)], -0.15, epsilon = 1e-12);
    }

    #[test]
    fn node_dilation_extends_solid() {
        // A node sphere larger than the strut radius bulges at the joint.
        let lattice = StrutLattice::new(
            vec![Point3::new(0.5, 0.5, 0.5), Point3::new(1.0, 0.5, 0.5)],
            vec![[0, 1]],
            0.05,
            0.25,
        );
        let grid = grid();
        let u = lattice_field(&lattice, &grid, &Pose::identity()).expect("field ok");

        // 0.2 from the node center: inside the node sphere, outside the strut.
        assert!(u[grid.index(5, 7, 5)] < 0.0);
    }

    #[test]
    fn pose_scale_recovers_world_units() {
        let lattice = StrutLattice::new(
            vec![Point3::new(0.0, 0.25, 0.25), Point3::new(0.5, 0.25, 0.25)],
            vec![[0, 1]],
            0.1,
            0.1,
        );
        let grid = grid();
        // Pose scale 2: the sampling-space lattice occupies half the cell.
        let pose = Pose::from_scale(2.0);
        let u = lattice_field(&lattice, &grid, &pose).expect("field ok");

        // World point (0.5, 0.5, 0.5) maps to sample (0.25, 0.25, 0.25),
        // on the strut axis; sample distance -0.1 scales to -0.2.
        assert_relative_eq!(u[grid.index(5, 5, 5)], -0.2, epsilon = 1e-12);
    }
}
