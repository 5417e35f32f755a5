//! Steady-state voltage ratio.

use tracing::warn;

use super::{contour_offset_sq, SINGULAR_RATIO, SINGULAR_TOLERANCE};
use crate::network::OperatingPoint;
use crate::params::ParameterSet;

/// Steady-state ratio `k` of load-bus voltage to generator internal voltage.
///
/// `k = 1 / sqrt((1 - Bc*X)^2 + (G*X)^2)` with `X = XL + Xd'`. When the point
/// sits on the common contour center the ratio is unbounded and
/// [`SINGULAR_RATIO`] is returned instead.
pub fn voltage_ratio(point: OperatingPoint, params: &ParameterSet) -> f64 {
    let denom = contour_offset_sq(point, params).sqrt();
    if denom < SINGULAR_TOLERANCE {
        warn!(g = point.g, bc = point.bc, "voltage ratio singular at contour center");
        return SINGULAR_RATIO;
    }
    1.0 / denom
}

/// Whether `k` is the singular-point sentinel rather than a real ratio.
pub fn is_singular_ratio(k: f64) -> bool {
    k == SINGULAR_RATIO
}
