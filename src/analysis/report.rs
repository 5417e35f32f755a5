//! One-shot evaluation of an operating point.

use std::fmt;

use tracing::debug;

use super::boundary::{classify, stability_boundary, StabilityCircle};
use super::eigen::{eigen, EigenResult};
use super::ratio::{is_singular_ratio, voltage_ratio};
use crate::network::OperatingPoint;
use crate::params::ParameterSet;

/// Everything the engine can say about a single operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    pub point: OperatingPoint,
    pub boundary: StabilityCircle,
    /// Result of the boundary test
    pub stable: bool,
    /// Steady-state voltage ratio, or the singular sentinel
    pub voltage_ratio: f64,
    pub eigen: EigenResult,
}

impl StabilityReport {
    /// Evaluate `point` against the machine described by `params`.
    pub fn evaluate(point: OperatingPoint, params: &ParameterSet) -> Self {
        let boundary = stability_boundary(params);
        let report = Self {
            point,
            boundary,
            stable: classify(point, &boundary),
            voltage_ratio: voltage_ratio(point, params),
            eigen: eigen(point, params),
        };
        debug!(
            g = point.g,
            bc = point.bc,
            stable = report.stable,
            k = report.voltage_ratio,
            "evaluated operating point"
        );
        report
    }

    /// Signed distance from the boundary rim (negative inside).
    pub fn margin(&self) -> f64 {
        self.boundary.margin(self.point)
    }

    /// The point sits on the contour center where neither the ratio nor the
    /// roots are defined. Callers should treat it as unstable.
    pub fn is_singular(&self) -> bool {
        is_singular_ratio(self.voltage_ratio) || self.eigen.is_degenerate()
    }
}

impl fmt::Display for StabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "operating point : {}", self.point)?;
        writeln!(f, "boundary        : {}", self.boundary)?;
        writeln!(
            f,
            "classification  : {} (margin {:+.6})",
            if self.stable { "stable" } else { "unstable" },
            self.margin()
        )?;
        if is_singular_ratio(self.voltage_ratio) {
            writeln!(f, "voltage ratio   : singular")?;
        } else {
            writeln!(f, "voltage ratio   : {:.5}", self.voltage_ratio)?;
        }
        write!(
            f,
            "eigenvalues     : {} ({}{})",
            self.eigen,
            if self.eigen.is_stable() { "stable" } else { "unstable" },
            if self.eigen.is_oscillatory() { ", oscillatory" } else { "" }
        )
    }
}
