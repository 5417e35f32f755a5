//! Circles in the (G, Bc) plane: the self-excitation boundary and the
//! equal-voltage-ratio contours.

use std::fmt;

use crate::network::OperatingPoint;
use crate::params::ParameterSet;

/// A circle in the admittance plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityCircle {
    pub center_g: f64,
    pub center_bc: f64,
    pub radius: f64,
}

impl StabilityCircle {
    /// Euclidean distance from the circle center to `point`.
    pub fn distance_to(&self, point: OperatingPoint) -> f64 {
        (point.g - self.center_g).hypot(point.bc - self.center_bc)
    }

    /// Signed distance outside the circle. Negative inside, zero on the rim.
    pub fn margin(&self, point: OperatingPoint) -> f64 {
        self.distance_to(point) - self.radius
    }

    /// Whether `point` lies inside or on the circle.
    pub fn contains(&self, point: OperatingPoint) -> bool {
        self.distance_to(point) <= self.radius
    }

    /// Lower and upper Bc where the vertical line `G = g` meets the circle.
    ///
    /// Returns `None` when the line misses the circle.
    pub fn bc_crossings(&self, g: f64) -> Option<(f64, f64)> {
        let dg = g - self.center_g;
        let half_chord_sq = self.radius * self.radius - dg * dg;
        if half_chord_sq < 0.0 {
            return None;
        }
        let half_chord = half_chord_sq.sqrt();
        Some((self.center_bc - half_chord, self.center_bc + half_chord))
    }

    /// Point on the rim at angle `theta` (radians, measured from +G).
    pub fn point_at(&self, theta: f64) -> OperatingPoint {
        OperatingPoint::new(
            self.center_g + self.radius * theta.cos(),
            self.center_bc + self.radius * theta.sin(),
        )
    }
}

impl fmt::Display for StabilityCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center=(G={:.6}, Bc={:.6}) radius={:.6}",
            self.center_g, self.center_bc, self.radius
        )
    }
}

/// Self-excitation boundary for the given machine.
///
/// Operating points inside or on this circle make the linearized
/// characteristic equation have a root with non-negative real part. The
/// circle always lies in `Bc > 0` because `Xd > Xd'`.
pub fn stability_boundary(params: &ParameterSet) -> StabilityCircle {
    let xt = params.transient_reactance();
    let xs = params.synchronous_reactance();
    StabilityCircle {
        center_g: 0.0,
        center_bc: 0.5 * (1.0 / xt + 1.0 / xs),
        radius: params.reactance_gap() / (2.0 * xt * xs),
    }
}

/// Contour of equal steady-state voltage ratio `k` (k > 0).
///
/// All contours share the center `(0, 1/(XL + Xd'))` and shrink as `k` grows.
pub fn voltage_contour(params: &ParameterSet, k: f64) -> StabilityCircle {
    let xt = params.transient_reactance();
    StabilityCircle {
        center_g: 0.0,
        center_bc: 1.0 / xt,
        radius: 1.0 / (k * xt),
    }
}

/// A family of voltage contours, one per requested ratio, in input order.
pub fn voltage_contours(params: &ParameterSet, ratios: &[f64]) -> Vec<(f64, StabilityCircle)> {
    ratios
        .iter()
        .map(|&k| (k, voltage_contour(params, k)))
        .collect()
}

/// Classify an operating point against the self-excitation boundary.
///
/// Stable only when strictly outside; points on the rim count as unstable.
pub fn classify(point: OperatingPoint, boundary: &StabilityCircle) -> bool {
    boundary.distance_to(point) > boundary.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reference_boundary() {
        let b = stability_boundary(&ParameterSet::default());
        assert_eq!(b.center_g, 0.0);
        assert_relative_eq!(b.center_bc, 0.5 * (1.0 / 5.3 + 1.0 / 6.8), epsilon = 1e-12);
        assert_abs_diff_eq!(b.center_bc, 0.167869, epsilon = 1e-6);
        assert_abs_diff_eq!(b.radius, 0.020810, epsilon = 1e-6);
    }

    #[test]
    fn test_classify_reference_points() {
        let b = stability_boundary(&ParameterSet::default());
        assert!(classify(OperatingPoint::new(0.1, 0.15), &b));
        assert!(classify(OperatingPoint::new(0.02, 0.18), &b));
        assert!(!classify(OperatingPoint::new(0.01, 0.17), &b));
        assert!(!classify(OperatingPoint::new(0.0, b.center_bc), &b));
        assert!(classify(OperatingPoint::new(0.0, 0.0), &b));
    }

    #[test]
    fn test_rim_is_unstable() {
        let b = StabilityCircle {
            center_g: 0.0,
            center_bc: 0.5,
            radius: 0.25,
        };
        assert!(!classify(OperatingPoint::new(0.0, 0.25), &b));
        assert!(b.contains(OperatingPoint::new(0.0, 0.75)));
        assert!(classify(OperatingPoint::new(0.0, 0.2499), &b));
    }

    #[test]
    fn test_bc_crossings() {
        let b = stability_boundary(&ParameterSet::default());
        let (lo, hi) = b.bc_crossings(0.0).unwrap();
        assert_relative_eq!(lo, b.center_bc - b.radius, epsilon = 1e-12);
        assert_relative_eq!(hi, b.center_bc + b.radius, epsilon = 1e-12);
        assert!(b.bc_crossings(b.radius * 1.01).is_none());

        let (lo, _) = b.bc_crossings(0.01).unwrap();
        assert_abs_diff_eq!(b.margin(OperatingPoint::new(0.01, lo)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contours_nest_and_shrink() {
        let params = ParameterSet::default();
        let family = voltage_contours(&params, &[0.5, 1.0, 2.0, 5.0]);
        assert_eq!(family.len(), 4);
        for pair in family.windows(2) {
            assert_eq!(pair[0].1.center_bc, pair[1].1.center_bc);
            assert!(pair[0].1.radius > pair[1].1.radius);
        }
        assert_relative_eq!(family[1].1.radius, 1.0 / 5.3, epsilon = 1e-12);
    }

    #[test]
    fn test_contour_center_sits_on_boundary_rim() {
        // 1/X is the top of the boundary circle since 1/X - c = (1/X - 1/Xs)/2 = r
        let params = ParameterSet::default();
        let b = stability_boundary(&params);
        let c = voltage_contour(&params, 1.0);
        let top = OperatingPoint::new(c.center_g, c.center_bc);
        assert_abs_diff_eq!(b.margin(top), 0.0, epsilon = 1e-12);
    }
}
