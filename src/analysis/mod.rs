//! Stability analysis engine.
//!
//! Pure functions of a [`ParameterSet`] and an [`OperatingPoint`]; nothing
//! here holds state or fails. The pieces are:
//!
//! - [`stability_boundary`] / [`classify`] - the self-excitation circle and the
//!   point-in-circle test
//! - [`voltage_contour`] / [`voltage_ratio`] - equal-ratio circles and the
//!   direct ratio computation they agree with
//! - [`eigen`] - roots of the linearized characteristic quadratic
//! - [`simulate`] - synthetic post-disturbance voltage envelope
//!
//! ## Geometry
//!
//! With `X = XL + Xd'` and `Xs = XL + Xd`, the boundary circle is centered at
//! `Bc = (1/X + 1/Xs)/2` with radius `(1/X - 1/Xs)/2`. Its upper rim touches
//! `Bc = 1/X`, the common center of the voltage contours, which is the one
//! point where the ratio and the roots are undefined.

mod boundary;
mod eigen;
mod ratio;
mod report;
mod transient;

pub use boundary::{classify, stability_boundary, voltage_contour, voltage_contours, StabilityCircle};
pub use eigen::{eigen, EigenResult};
pub use ratio::{is_singular_ratio, voltage_ratio};
pub use report::StabilityReport;
pub use transient::{
    sample_count, simulate, Trajectory, TrajectorySample, DISTURBANCE_TIME, HORIZON, MAX_VOLTAGE,
    MIN_VOLTAGE, NOMINAL_VOLTAGE, TIME_STEP,
};

use crate::network::OperatingPoint;
use crate::params::ParameterSet;

/// Below this the operating point is taken to coincide with the contour center.
pub const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Voltage ratio reported for a singular operating point.
pub const SINGULAR_RATIO: f64 = 999.0;

/// `(1 - Bc*X)^2 + (G*X)^2`, the squared scaled distance from the contour center.
fn contour_offset_sq(point: OperatingPoint, params: &ParameterSet) -> f64 {
    let x = params.transient_reactance();
    let re = 1.0 - point.bc * x;
    let im = point.g * x;
    re * re + im * im
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn machine() -> impl Strategy<Value = ParameterSet> {
        (0.05f64..1.0, 0.05f64..3.0, 0.1f64..10.0, 0.5f64..10.0, 0.1f64..5.0).prop_map(
            |(xd_prime, gap, xl, td, tq)| {
                ParameterSet::new(xd_prime + gap, xd_prime, xl, td, tq)
                    .expect("strategy yields valid machines")
            },
        )
    }

    proptest! {
        #[test]
        fn boundary_lies_in_positive_bc(params in machine()) {
            let b = stability_boundary(&params);
            prop_assert!(b.radius > 0.0);
            prop_assert!(b.center_bc > 0.0);
            prop_assert!(b.center_bc - b.radius > 0.0);
        }

        #[test]
        fn classify_agrees_with_eigenvalues(
            params in machine(),
            scale in 0.0f64..2.0,
            theta in -std::f64::consts::FRAC_PI_2..std::f64::consts::FRAC_PI_2,
        ) {
            prop_assume!((scale - 1.0).abs() > 1e-6);
            let b = stability_boundary(&params);
            let point = OperatingPoint::new(
                scale * b.radius * theta.cos(),
                b.center_bc + scale * b.radius * theta.sin(),
            );
            prop_assume!(contour_offset_sq(point, &params) >= SINGULAR_TOLERANCE);

            prop_assert_eq!(classify(point, &b), eigen(point, &params).is_stable());
        }

        #[test]
        fn contour_round_trips_through_ratio(
            params in machine(),
            k in 0.05f64..50.0,
            theta in 0.0f64..std::f64::consts::TAU,
        ) {
            let point = voltage_contour(&params, k).point_at(theta);
            let ratio = voltage_ratio(point, &params);
            prop_assert!((ratio - k).abs() <= 1e-6 * k);
        }

        #[test]
        fn trajectory_stays_within_clamp(
            params in machine(),
            g in 0.0f64..5.0,
            bc in 0.0f64..5.0,
        ) {
            let traj = simulate(OperatingPoint::new(g, bc), &params);
            prop_assert_eq!(traj.len(), sample_count());
            for s in &traj {
                prop_assert!(s.voltage >= MIN_VOLTAGE && s.voltage <= MAX_VOLTAGE);
            }
        }
    }
}
