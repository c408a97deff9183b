//! Triply periodic minimal surface equations and parameters.
//!
//! All equations are evaluated in sampling space with period 1; the pose
//! transform carries scale, rotation, and placement, so the equations never
//! change.

use std::f64::consts::PI;

use nalgebra::Point3;

use crate::graded::GradedOffset;

/// The TPMS equation families supported by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TpmsKind {
    /// Gyroid: `sin x cos y + sin y cos z + sin z cos x`.
    #[default]
    Gyroid,
    /// Schwarz-P (primitive): `cos x + cos y + cos z`.
    SchwarzP,
    /// Schwarz-D (diamond): sum of four sin/cos products.
    Diamond,
    /// Neovius: `3 (cos x + cos y + cos z) + 4 cos x cos y cos z`.
    Neovius,
    /// I-WP: `2 (cos x cos y + cos y cos z + cos z cos x) - cos 2x - cos 2y - cos 2z`.
    Iwp,
}

impl TpmsKind {
    /// Name of this TPMS family.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gyroid => "Gyroid",
            Self::SchwarzP => "Schwarz-P",
            Self::Diamond => "Diamond",
            Self::Neovius => "Neovius",
            Self::Iwp => "I-WP",
        }
    }

    /// Evaluate the implicit equation at a sampling-space point.
    ///
    /// The surface is at value 0; the equations have period 1 along each
    /// axis.
    #[must_use]
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        let x = 2.0 * PI * point.x;
        let y = 2.0 * PI * point.y;
        let z = 2.0 * PI * point.z;

        match self {
            Self::Gyroid => {
                z.sin()
                    .mul_add(x.cos(), x.sin().mul_add(y.cos(), y.sin() * z.cos()))
            }
            Self::SchwarzP => x.cos() + y.cos() + z.cos(),
            Self::Diamond => {
                let (sx, cx) = x.sin_cos();
                let (sy, cy) = y.sin_cos();
                let (sz, cz) = z.sin_cos();
                (cx * cy).mul_add(sz, (cx * sy).mul_add(cz, (sx * sy).mul_add(sz, sx * cy * cz)))
            }
            Self::Neovius => {
                let cx = x.cos();
                let cy = y.cos();
                let cz = z.cos();
                3.0f64.mul_add(cx + cy + cz, 4.0 * cx * cy * cz)
            }
            Self::Iwp => {
                let cx = x.cos();
                let cy = y.cos();
                let cz = z.cos();
                2.0f64.mul_add(cz.mul_add(cx, cx.mul_add(cy, cy * cz)), -(2.0 * x).cos())
                    - (2.0 * y).cos()
                    - (2.0 * z).cos()
            }
        }
    }
}

/// Topology of the generated TPMS structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TpmsPhase {
    /// Network (single-walled) phase: solid where `f <= v1`.
    #[default]
    Network,
    /// Sheet (double-walled) phase: solid where `-v2 <= f <= v1`, the two
    /// offset level sets forming the walls.
    Sheet,
}

/// Parameters for the TPMS generator kind.
///
/// The offset fields `v1`/`v2` control the iso-level per grid point and
/// support graded/heterogeneous unit cells; degenerate (length-1) axes are
/// broadcast to the grid shape before use.
#[derive(Debug, Clone)]
pub struct TpmsParams {
    /// Equation family.
    pub kind: TpmsKind,
    /// Network or sheet topology.
    pub phase: TpmsPhase,
    /// First offset field.
    pub v1: GradedOffset,
    /// Second offset field (sheet phase only; ignored for network).
    pub v2: GradedOffset,
}

impl TpmsParams {
    /// Network-phase parameters with a uniform offset.
    #[must_use]
    pub fn network(kind: TpmsKind, offset: f64) -> Self {
        Self {
            kind,
            phase: TpmsPhase::Network,
            v1: GradedOffset::uniform(offset),
            v2: GradedOffset::uniform(0.0),
        }
    }

    /// Sheet-phase parameters with uniform wall offsets.
    #[must_use]
    pub fn sheet(kind: TpmsKind, v1: f64, v2: f64) -> Self {
        Self {
            kind,
            phase: TpmsPhase::Sheet,
            v1: GradedOffset::uniform(v1),
            v2: GradedOffset::uniform(v2),
        }
    }

    /// Replace the first offset field.
    #[must_use]
    pub fn with_v1(mut self, v1: GradedOffset) -> Self {
        self.v1 = v1;
        self
    }

    /// Replace the second offset field.
    #[must_use]
    pub fn with_v2(mut self, v2: GradedOffset) -> Self {
        self.v2 = v2;
        self
    }

    /// Combine the base equation value with the offsets for this phase.
    #[inline]
    #[must_use]
    pub fn combine(&self, f: f64, v1: f64, v2: f64) -> f64 {
        match self.phase {
            TpmsPhase::Network => f - v1,
            TpmsPhase::Sheet => (f - v1).max(-f - v2),
        }
    }
}

/// Calibration mapping volume fraction to iso-value offset for one TPMS
/// family.
///
/// The coefficients are precomputed curve fits specific to each equation;
/// they are opaque supplied data, not re-derived here. The defaults are
/// coarse linear fits; callers with measured calibrations should supply
/// their own coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoCalibration {
    /// Polynomial coefficients, constant term first.
    coefficients: Vec<f64>,
}

impl IsoCalibration {
    /// Create a calibration from polynomial coefficients (constant term
    /// first).
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Default linear calibration for a TPMS family.
    ///
    /// Maps volume fraction 0.5 to offset 0, with a per-family slope
    /// matching the equation's approximate iso-value range. The network
    /// phase is solid where `f <= v1`, so denser cells get larger
    /// offsets.
    #[must_use]
    pub fn for_kind(kind: TpmsKind) -> Self {
        let slope = match kind {
            TpmsKind::Gyroid | TpmsKind::Diamond => 3.0,
            TpmsKind::SchwarzP => 6.0,
            TpmsKind::Neovius => 8.0,
            TpmsKind::Iwp => 7.0,
        };
        // offset = slope * (vf - 0.5)
        Self::new(vec![-0.5 * slope, slope])
    }

    /// Evaluate the calibration polynomial at a volume fraction.
    #[must_use]
    pub fn offset_for(&self, volume_fraction: f64) -> f64 {
        let vf = volume_fraction.clamp(0.0, 1.0);
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc.mul_add(vf, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gyroid_at_origin() {
        let value = TpmsKind::Gyroid.evaluate(&Point3::origin());
        assert_relative_eq!(value, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn schwarz_p_at_origin() {
        let value = TpmsKind::SchwarzP.evaluate(&Point3::origin());
        assert_relative_eq!(value, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn neovius_at_origin() {
        // 3*(1+1+1) + 4*1 = 13
        let value = TpmsKind::Neovius.evaluate(&Point3::origin());
        assert_relative_eq!(value, 13.0, epsilon = 1e-10);
    }

    #[test]
    fn unit_periodicity() {
        for kind in [
            TpmsKind::Gyroid,
            TpmsKind::SchwarzP,
            TpmsKind::Diamond,
            TpmsKind::Neovius,
            TpmsKind::Iwp,
        ] {
            let p = Point3::new(0.23, 0.61, 0.17);
            let q = Point3::new(p.x + 1.0, p.y + 2.0, p.z - 1.0);
            assert_relative_eq!(kind.evaluate(&p), kind.evaluate(&q), epsilon = 1e-9);
        }
    }

    #[test]
    fn network_combine_with_zero_offset_is_identity() {
        let params = TpmsParams::network(TpmsKind::Gyroid, 0.0);
        for f in [-1.2, -0.3, 0.0, 0.7, 2.5] {
            assert_relative_eq!(params.combine(f, 0.0, 0.0), f, epsilon = 1e-15);
        }
    }

    #[test]
    fn sheet_combine_is_band() {
        let params = TpmsParams::sheet(TpmsKind::Gyroid, 0.3, 0.3);
        // Inside the band: solid.
        assert!(params.combine(0.0, 0.3, 0.3) <= 0.0);
        assert!(params.combine(0.29, 0.3, 0.3) <= 0.0);
        assert!(params.combine(-0.29, 0.3, 0.3) <= 0.0);
        // Outside the band: void.
        assert!(params.combine(0.5, 0.3, 0.3) > 0.0);
        assert!(params.combine(-0.5, 0.3, 0.3) > 0.0);
    }

    #[test]
    fn calibration_midpoint_is_zero() {
        for kind in [TpmsKind::Gyroid, TpmsKind::SchwarzP, TpmsKind::Diamond] {
            let cal = IsoCalibration::for_kind(kind);
            assert_relative_eq!(cal.offset_for(0.5), 0.0, epsilon = 1e-12);
            // Denser cells widen the solid region (larger offset).
            assert!(cal.offset_for(0.7) > 0.0);
            assert!(cal.offset_for(0.3) < 0.0);
        }
    }

    #[test]
    fn calibration_horner() {
        // 1 + 2*vf + 3*vf^2 at vf = 0.5 -> 1 + 1 + 0.75
        let cal = IsoCalibration::new(vec![1.0, 2.0, 3.0]);
        assert_relative_eq!(cal.offset_for(0.5), 2.75, epsilon = 1e-12);
    }
}
