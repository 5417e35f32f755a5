//! A complete analysis input: machine constants plus a point source.

use super::config::{aggregate, SystemConfiguration};
use super::types::{ComponentSpec, OperatingPoint};
use crate::dsl::ScenarioAst;
use crate::error::{GenstabError, Result};
use crate::params::ParameterSet;

/// Where the operating point comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PointSource {
    /// Derived from switchable loads and capacitors
    Aggregated(SystemConfiguration),
    /// Set directly in the (G, Bc) plane
    Direct(OperatingPoint),
}

impl PointSource {
    /// Resolve the current operating point.
    pub fn operating_point(&self) -> OperatingPoint {
        match self {
            Self::Aggregated(config) => aggregate(config),
            Self::Direct(point) => *point,
        }
    }
}

impl Default for PointSource {
    fn default() -> Self {
        Self::Aggregated(SystemConfiguration::default())
    }
}

/// Machine constants together with the source of the operating point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scenario {
    pub params: ParameterSet,
    pub source: PointSource,
}

impl Scenario {
    /// Build a scenario from a parsed AST.
    ///
    /// Machine overrides are applied on top of [`ParameterSet::default`]. A
    /// scenario with a `.point` directive may not also declare components or
    /// a reference voltage.
    pub fn from_ast(ast: ScenarioAst) -> Result<Self> {
        let params = ParameterSet::default()
            .with_params(ast.machine.iter().map(|def| (def.key.as_str(), def.value)))?;

        let source = match ast.point {
            Some(point) => {
                if !ast.components.is_empty() {
                    return Err(GenstabError::ConflictingEntryModes {
                        message: format!(
                            ".point on line {} cannot be combined with {} component(s)",
                            point.line,
                            ast.components.len()
                        ),
                    });
                }
                if let Some(voltage) = ast.voltage {
                    return Err(GenstabError::ConflictingEntryModes {
                        message: format!(
                            ".voltage on line {} only applies to component networks",
                            voltage.line
                        ),
                    });
                }
                PointSource::Direct(OperatingPoint::checked(point.g, point.bc)?)
            }
            None => {
                let voltage = ast.voltage.map_or(super::DEFAULT_VOLTAGE, |v| v.value);
                let mut config = SystemConfiguration::new(voltage)?;
                for def in ast.components {
                    let spec = ComponentSpec::new(def.name, def.kind, def.magnitude)
                        .with_connected(def.connected);
                    config.add(spec)?;
                }
                PointSource::Aggregated(config)
            }
        };

        Ok(Self { params, source })
    }

    /// Resolve the operating point for this scenario.
    pub fn operating_point(&self) -> OperatingPoint {
        self.source.operating_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use approx::assert_relative_eq;

    fn scenario(input: &str) -> Result<Scenario> {
        Scenario::from_ast(dsl::parse(input)?)
    }

    #[test]
    fn test_aggregated_scenario() {
        let s = scenario(".machine XL=4\n.voltage 2\nLOAD m 0.4\nCAP c 0.8\nCAP d 1 off").unwrap();
        assert_relative_eq!(s.params.xl(), 4.0);
        assert_relative_eq!(s.params.xd(), 1.8);
        let point = s.operating_point();
        assert_relative_eq!(point.g, 0.1, epsilon = 1e-12);
        assert_relative_eq!(point.bc, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_machine_overrides_apply_together() {
        let s = scenario(".machine Xdp=2 Xd=3\n.point G=0 Bc=0").unwrap();
        assert_relative_eq!(s.params.xd_prime(), 2.0);
    }

    #[test]
    fn test_direct_scenario() {
        let s = scenario(".point G=0.1 Bc=0.15").unwrap();
        assert_eq!(s.source, PointSource::Direct(OperatingPoint::new(0.1, 0.15)));
        assert_eq!(s.params, ParameterSet::default());
    }

    #[test]
    fn test_conflicting_modes() {
        assert!(matches!(
            scenario(".point G=0.1 Bc=0.15\nLOAD m 0.1"),
            Err(GenstabError::ConflictingEntryModes { .. })
        ));
        assert!(matches!(
            scenario(".voltage 1.1\n.point G=0.1 Bc=0.15"),
            Err(GenstabError::ConflictingEntryModes { .. })
        ));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let ast = ScenarioAst {
            point: Some(crate::dsl::PointDef {
                g: f64::INFINITY,
                bc: 0.0,
                line: 1,
            }),
            ..ScenarioAst::default()
        };
        assert!(matches!(
            Scenario::from_ast(ast),
            Err(GenstabError::InvalidOperatingPoint { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs_surface() {
        assert!(matches!(
            scenario(".machine Xdp=3"),
            Err(GenstabError::InvalidMachineParameters { .. })
        ));
        assert!(matches!(
            scenario("LOAD a 0.1\nLOAD a 0.2"),
            Err(GenstabError::DuplicateComponent { .. })
        ));
        assert!(matches!(
            scenario(".voltage -1"),
            Err(GenstabError::InvalidVoltage { .. })
        ));
        assert!(scenario("LOAD a -0.1").is_err());
    }
}
