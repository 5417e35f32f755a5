//! Post-disturbance voltage trajectory.
//!
//! The trajectory is a synthetic envelope shaped from the dominant
//! eigenvalue, not a numerical integration of the machine equations. The
//! operating point is held fixed for the whole run and the time grid is
//! fixed, so every run produces the same number of samples.

use tracing::debug;

use super::eigen::{eigen, EigenResult};
use super::ratio::voltage_ratio;
use crate::network::OperatingPoint;
use crate::params::ParameterSet;

/// Time of the simulated disturbance in seconds.
pub const DISTURBANCE_TIME: f64 = 0.5;

/// End of the simulated window in seconds.
pub const HORIZON: f64 = 8.0;

/// Sample spacing in seconds.
pub const TIME_STEP: f64 = 0.02;

/// Voltage before the disturbance, per-unit.
pub const NOMINAL_VOLTAGE: f64 = 1.0;

/// Lower clamp on every sample, per-unit.
pub const MIN_VOLTAGE: f64 = 0.4;

/// Upper clamp on every sample, per-unit.
pub const MAX_VOLTAGE: f64 = 2.5;

/// Relative amplitude of the post-disturbance excursion on the stable branch.
const STABLE_EXCURSION: f64 = 0.2;

/// Growth-rate scaling applied to the dominant root on the unstable branch.
const GROWTH_RATE_SCALE: f64 = 0.5;

/// Cap on unstable growth relative to the steady-state ratio.
const MAX_GROWTH: f64 = 4.0;

/// One point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    /// Time in seconds (>= 0)
    pub t: f64,
    /// Load-bus voltage in per-unit, within [`MIN_VOLTAGE`, `MAX_VOLTAGE`]
    pub voltage: f64,
    /// Stability of the operating point; identical for every sample of a run
    pub stable: bool,
}

/// A finite, time-ordered voltage trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Stability flag shared by all samples.
    pub fn is_stable(&self) -> bool {
        self.samples.first().is_some_and(|s| s.stable)
    }

    /// Voltage at the end of the horizon.
    pub fn final_voltage(&self) -> Option<f64> {
        self.samples.last().map(|s| s.voltage)
    }

    /// Largest voltage over the run.
    pub fn peak_voltage(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.voltage).reduce(f64::max)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Number of samples on the fixed grid, both ends included.
pub fn sample_count() -> usize {
    (HORIZON / TIME_STEP).round() as usize + 1
}

/// Simulate the voltage response to a disturbance at [`DISTURBANCE_TIME`].
///
/// Before the disturbance the voltage is nominal. Afterwards it settles
/// towards the steady-state ratio `k` with a decaying (possibly oscillating)
/// excursion when the point is stable, or grows away from `k` at half the
/// dominant rate, capped at four times `k`, when it is not. Every sample is
/// clamped to `[0.4, 2.5]`.
pub fn simulate(point: OperatingPoint, params: &ParameterSet) -> Trajectory {
    let k = voltage_ratio(point, params);
    let eig = eigen(point, params);
    let stable = eig.is_stable();
    let disturbance_step = (DISTURBANCE_TIME / TIME_STEP).round() as usize;

    let samples: Vec<TrajectorySample> = (0..sample_count())
        .map(|i| {
            let t = i as f64 * TIME_STEP;
            let voltage = if i <= disturbance_step {
                NOMINAL_VOLTAGE
            } else {
                let tau = (i - disturbance_step) as f64 * TIME_STEP;
                if stable {
                    settling_envelope(k, &eig, tau)
                } else {
                    growth_envelope(k, eig.real(), tau)
                }
            };

            TrajectorySample {
                t,
                voltage: voltage.clamp(MIN_VOLTAGE, MAX_VOLTAGE),
                stable,
            }
        })
        .collect();

    debug!(
        g = point.g,
        bc = point.bc,
        k,
        stable,
        samples = samples.len(),
        "simulated disturbance response"
    );

    Trajectory { samples }
}

/// Unclamped voltage `tau` seconds after the disturbance at a stable point.
fn settling_envelope(k: f64, eig: &EigenResult, tau: f64) -> f64 {
    let decay = (eig.real() * tau).exp();
    let osc = if eig.is_oscillatory() {
        (eig.imag() * tau).cos()
    } else {
        1.0
    };
    k * (1.0 + STABLE_EXCURSION * decay * osc)
}

/// Unclamped voltage `tau` seconds after the disturbance at an unstable point.
fn growth_envelope(k: f64, real: f64, tau: f64) -> f64 {
    let growth = (GROWTH_RATE_SCALE * real.abs() * tau).exp().min(MAX_GROWTH);
    k * growth
}
