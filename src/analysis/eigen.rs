//! Characteristic roots of the linearized generator-network model.

use std::fmt;

use tracing::warn;

use super::{contour_offset_sq, SINGULAR_TOLERANCE};
use crate::network::OperatingPoint;
use crate::params::ParameterSet;

/// Roots of the characteristic quadratic `a*s^2 + b*s + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EigenResult {
    /// Two real roots (discriminant >= 0)
    RealPair { s1: f64, s2: f64 },
    /// Complex conjugate pair `real_part ± j*imag_part`, `imag_part >= 0`
    ComplexPair { real_part: f64, imag_part: f64 },
    /// Admittance point coincides with the contour center; no roots defined
    Degenerate,
}

impl EigenResult {
    /// Real part of the dominant (least stable) root. Zero when degenerate.
    pub fn real(&self) -> f64 {
        match *self {
            Self::RealPair { s1, s2 } => s1.max(s2),
            Self::ComplexPair { real_part, .. } => real_part,
            Self::Degenerate => 0.0,
        }
    }

    /// Imaginary magnitude of the dominant root. Zero unless complex.
    pub fn imag(&self) -> f64 {
        match *self {
            Self::ComplexPair { imag_part, .. } => imag_part,
            _ => 0.0,
        }
    }

    /// All roots strictly in the left half plane. Degenerate results are unstable.
    pub fn is_stable(&self) -> bool {
        match *self {
            Self::RealPair { s1, s2 } => s1 < 0.0 && s2 < 0.0,
            Self::ComplexPair { real_part, .. } => real_part < 0.0,
            Self::Degenerate => false,
        }
    }

    /// Whether the response oscillates.
    pub fn is_oscillatory(&self) -> bool {
        matches!(self, Self::ComplexPair { .. })
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

impl fmt::Display for EigenResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::RealPair { s1, s2 } => write!(f, "s1={:.5} s2={:.5}", s1, s2),
            Self::ComplexPair {
                real_part,
                imag_part,
            } => write!(f, "s={:.5} ± j{:.5}", real_part, imag_part),
            Self::Degenerate => write!(f, "degenerate"),
        }
    }
}

/// Solve the characteristic equation at `point`.
///
/// The network seen from the machine terminals is reflected into an
/// admittance `Yr + j*Yi`, which sets the quadratic
///
/// ```text
/// a = Td0' * Tq0'
/// b = -(Td0' + Tq0') * (Yi*Xdq - 1)
/// c = (Yi*Xdq - 1)^2 + (Yr*Xdq)^2
/// ```
///
/// with `Xdq = Xd - Xd'`. Since `a > 0` the sign of the dominant root only
/// depends on `b` and the discriminant.
///
/// The admittance is computed with G and Bc scaled down by their magnitude so
/// that very large finite points do not overflow into NaN roots.
pub fn eigen(point: OperatingPoint, params: &ParameterSet) -> EigenResult {
    let denom = contour_offset_sq(point, params);
    if denom < SINGULAR_TOLERANCE {
        warn!(g = point.g, bc = point.bc, "characteristic equation degenerate");
        return EigenResult::Degenerate;
    }

    let x = params.transient_reactance();
    let xdq = params.reactance_gap();
    let (g, bc) = (point.g, point.bc);

    // Yr = G/d, Yi = (q/d - 1)/X with q = 1 - Bc*X and d = (G*X)^2 + q^2
    let m = g.abs().max(bc.abs()).max(1.0);
    let p = g / m * x;
    let q = 1.0 / m - bc / m * x;
    let spread = m * (p * p + q * q);
    let yr = (g / m) / spread;
    let yi = (q / spread - 1.0) / x;

    let td = params.td0_prime();
    let tq = params.tq0_prime();
    let detuning = yi * xdq - 1.0;

    let a = td * tq;
    let b = -(td + tq) * detuning;
    let c = detuning * detuning + (yr * xdq) * (yr * xdq);
    let disc = b * b - 4.0 * a * c;

    if disc >= 0.0 {
        let root = disc.sqrt();
        EigenResult::RealPair {
            s1: (-b + root) / (2.0 * a),
            s2: (-b - root) / (2.0 * a),
        }
    } else {
        EigenResult::ComplexPair {
            real_part: -b / (2.0 * a),
            imag_part: (-disc).sqrt() / (2.0 * a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_open_circuit_is_stable() {
        // No load: Yr = Yi = 0, roots are -1/Td0' and -1/Tq0'
        let eig = eigen(OperatingPoint::new(0.0, 0.0), &ParameterSet::default());
        match eig {
            EigenResult::RealPair { s1, s2 } => {
                assert_abs_diff_eq!(s1.max(s2), -0.2, epsilon = 1e-12);
                assert_abs_diff_eq!(s1.min(s2), -1.0, epsilon = 1e-12);
            }
            other => panic!("expected real roots, got {:?}", other),
        }
        assert!(eig.is_stable());
        assert!(!eig.is_oscillatory());
        assert_abs_diff_eq!(eig.real(), -0.2, epsilon = 1e-12);
        assert_eq!(eig.imag(), 0.0);
    }

    #[test]
    fn test_loaded_point_oscillates_stably() {
        let eig = eigen(OperatingPoint::new(0.02, 0.18), &ParameterSet::default());
        assert!(eig.is_oscillatory());
        assert!(eig.is_stable());
        assert!(eig.real() < 0.0);
        assert!(eig.imag() > 0.0);
    }

    #[test]
    fn test_inside_boundary_is_unstable() {
        let eig = eigen(OperatingPoint::new(0.0, 0.1679), &ParameterSet::default());
        assert!(!eig.is_stable());
        assert!(eig.real() > 0.0);
    }

    #[test]
    fn test_far_points_stay_finite_and_stable() {
        let params = ParameterSet::default();
        let boundary = crate::analysis::stability_boundary(&params);
        for &(g, bc) in &[(1e200, 0.0), (0.0, 1e200), (1e300, -1e300), (f64::MAX, 0.0)] {
            let point = OperatingPoint::new(g, bc);
            let eig = eigen(point, &params);
            assert!(eig.real().is_finite(), "{:?} -> {:?}", point, eig);
            assert!(eig.is_stable());
            assert_eq!(crate::analysis::classify(point, &boundary), eig.is_stable());
        }
    }

    #[test]
    fn test_degenerate_point() {
        let eig = eigen(OperatingPoint::new(0.0, 1.0 / 5.3), &ParameterSet::default());
        assert!(eig.is_degenerate());
        assert!(!eig.is_stable());
        assert_eq!(eig.real(), 0.0);
        assert_eq!(eig.imag(), 0.0);
    }
}
