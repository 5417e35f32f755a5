//! Caller-owned analysis state.
//!
//! The engine itself is stateless. An [`AnalysisSession`] holds the one
//! piece of mutable state an interactive front end needs (the current
//! machine and where the operating point comes from) and re-runs the engine
//! on every query. Nothing is cached between calls.

use tracing::info;

use crate::analysis::{simulate, StabilityReport, Trajectory};
use crate::error::{GenstabError, Result};
use crate::network::{OperatingPoint, PointSource, Scenario, SystemConfiguration};
use crate::params::ParameterSet;

/// Current inputs of an interactive analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    params: ParameterSet,
    source: PointSource,
}

impl AnalysisSession {
    /// Start a session with an empty load network.
    pub fn new(params: ParameterSet) -> Self {
        Self {
            params,
            source: PointSource::default(),
        }
    }

    /// Start a session from a parsed scenario.
    pub fn from_scenario(scenario: Scenario) -> Self {
        Self {
            params: scenario.params,
            source: scenario.source,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn source(&self) -> &PointSource {
        &self.source
    }

    /// Replace the machine constants wholesale.
    pub fn set_params(&mut self, params: ParameterSet) {
        info!(%params, "machine parameters replaced");
        self.params = params;
    }

    /// Edit one machine constant by name.
    pub fn set_param(&mut self, key: &str, value: f64) -> Result<()> {
        let params = self.params.with_param(key, value)?;
        self.set_params(params);
        Ok(())
    }

    /// Switch to direct manipulation of the operating point.
    pub fn set_direct_point(&mut self, point: OperatingPoint) -> Result<()> {
        let point = OperatingPoint::checked(point.g, point.bc)?;
        self.source = PointSource::Direct(point);
        Ok(())
    }

    /// Switch to a component network.
    pub fn set_configuration(&mut self, config: SystemConfiguration) {
        self.source = PointSource::Aggregated(config);
    }

    /// Flip a component in or out. Only valid in aggregate mode.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        self.configuration_mut()?.toggle(name)
    }

    /// Change a component's magnitude. Only valid in aggregate mode.
    pub fn set_magnitude(&mut self, name: &str, magnitude: f64) -> Result<()> {
        self.configuration_mut()?.set_magnitude(name, magnitude)
    }

    fn configuration_mut(&mut self) -> Result<&mut SystemConfiguration> {
        match &mut self.source {
            PointSource::Aggregated(config) => Ok(config),
            PointSource::Direct(_) => Err(GenstabError::ConflictingEntryModes {
                message: "component edits need a component network, not a direct point".to_string(),
            }),
        }
    }

    /// Current operating point, recomputed from the source.
    pub fn operating_point(&self) -> OperatingPoint {
        self.source.operating_point()
    }

    /// Evaluate the current operating point.
    pub fn evaluate(&self) -> StabilityReport {
        StabilityReport::evaluate(self.operating_point(), &self.params)
    }

    /// Run a fresh disturbance simulation at the current operating point.
    pub fn simulate(&self) -> Trajectory {
        simulate(self.operating_point(), &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ComponentSpec;

    fn network() -> SystemConfiguration {
        SystemConfiguration::new(1.0)
            .unwrap()
            .with(ComponentSpec::load("motor", 0.01))
            .unwrap()
            .with(ComponentSpec::capacitor("bank", 0.17))
            .unwrap()
            .with(ComponentSpec::load("heater", 0.09).with_connected(false))
            .unwrap()
    }

    #[test]
    fn test_toggle_moves_point_out_of_unstable_region() {
        let mut session = AnalysisSession::new(ParameterSet::default());
        session.set_configuration(network());
        assert!(!session.evaluate().stable);

        assert!(session.toggle("heater").unwrap());
        let report = session.evaluate();
        assert!(report.stable);
        assert!(report.eigen.is_stable());
        assert!(session.simulate().is_stable());
    }

    #[test]
    fn test_direct_mode_feeds_same_engine() {
        let mut session = AnalysisSession::default();
        session.set_configuration(network());
        let aggregated = session.evaluate();

        session.set_direct_point(session.operating_point()).unwrap();
        assert_eq!(session.evaluate(), aggregated);
        assert!(matches!(
            session.toggle("motor"),
            Err(GenstabError::ConflictingEntryModes { .. })
        ));
    }

    #[test]
    fn test_non_finite_direct_point_keeps_previous_source() {
        let mut session = AnalysisSession::default();
        session.set_direct_point(OperatingPoint::new(0.1, 0.15)).unwrap();
        assert!(matches!(
            session.set_direct_point(OperatingPoint::new(f64::NAN, 0.1)),
            Err(GenstabError::InvalidOperatingPoint { .. })
        ));
        assert!(session.set_direct_point(OperatingPoint::new(0.1, f64::NEG_INFINITY)).is_err());
        assert_eq!(session.operating_point(), OperatingPoint::new(0.1, 0.15));
    }

    #[test]
    fn test_param_edit_recomputes_boundary() {
        let mut session = AnalysisSession::default();
        session.set_direct_point(OperatingPoint::new(0.0, 0.0)).unwrap();
        let before = session.evaluate().boundary;
        session.set_param("XL", 2.0).unwrap();
        assert_ne!(session.evaluate().boundary, before);
        assert!(session.set_param("Xdp", 5.0).is_err());
        assert_eq!(session.params().xl(), 2.0);
    }
}
