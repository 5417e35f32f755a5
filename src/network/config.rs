//! Switchable load network and admittance aggregation.

use tracing::debug;

use super::types::{ComponentKind, ComponentSpec, OperatingPoint};
use crate::error::{GenstabError, Result};

/// Default reference voltage in per-unit.
pub const DEFAULT_VOLTAGE: f64 = 1.0;

/// A set of loads and capacitors plus the reference voltage they are rated at.
///
/// The configuration is owned by the caller and edited in place; the
/// aggregate operating point is never cached and must be recomputed with
/// [`aggregate`] after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfiguration {
    voltage: f64,
    components: Vec<ComponentSpec>,
}

impl SystemConfiguration {
    /// Create an empty configuration at the given reference voltage.
    pub fn new(voltage: f64) -> Result<Self> {
        check_voltage(voltage)?;
        Ok(Self {
            voltage,
            components: Vec::new(),
        })
    }

    /// Reference voltage V.
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Change the reference voltage.
    pub fn set_voltage(&mut self, voltage: f64) -> Result<()> {
        check_voltage(voltage)?;
        self.voltage = voltage;
        Ok(())
    }

    /// All components, in insertion order.
    pub fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Add a component. Names must be unique and magnitudes finite and >= 0.
    pub fn add(&mut self, component: ComponentSpec) -> Result<()> {
        if self.component(&component.name).is_some() {
            return Err(GenstabError::DuplicateComponent {
                name: component.name,
            });
        }
        check_magnitude(&component.name, component.magnitude)?;
        self.components.push(component);
        Ok(())
    }

    /// Builder-style [`SystemConfiguration::add`].
    pub fn with(mut self, component: ComponentSpec) -> Result<Self> {
        self.add(component)?;
        Ok(self)
    }

    /// Flip a component's connection state and return the new state.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let component = self.component_mut(name)?;
        component.connected = !component.connected;
        Ok(component.connected)
    }

    /// Connect or disconnect a component.
    pub fn set_connected(&mut self, name: &str, connected: bool) -> Result<()> {
        self.component_mut(name)?.connected = connected;
        Ok(())
    }

    /// Change a component's magnitude.
    pub fn set_magnitude(&mut self, name: &str, magnitude: f64) -> Result<()> {
        check_magnitude(name, magnitude)?;
        self.component_mut(name)?.magnitude = magnitude;
        Ok(())
    }

    fn component_mut(&mut self, name: &str) -> Result<&mut ComponentSpec> {
        self.components
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| GenstabError::ComponentNotFound {
                name: name.to_string(),
            })
    }

    /// Sum of connected magnitudes of one kind.
    pub fn connected_total(&self, kind: ComponentKind) -> f64 {
        self.components
            .iter()
            .filter(|c| c.kind == kind)
            .map(ComponentSpec::contribution)
            .sum()
    }
}

impl Default for SystemConfiguration {
    fn default() -> Self {
        Self {
            voltage: DEFAULT_VOLTAGE,
            components: Vec::new(),
        }
    }
}

fn check_voltage(voltage: f64) -> Result<()> {
    if !voltage.is_finite() || voltage <= 0.0 {
        return Err(GenstabError::InvalidVoltage { value: voltage });
    }
    Ok(())
}

fn check_magnitude(name: &str, magnitude: f64) -> Result<()> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(GenstabError::InvalidParameter {
            param: name.to_string(),
            message: format!("magnitude must be finite and >= 0, got {}", magnitude),
        });
    }
    Ok(())
}

/// Reduce a configuration to its aggregate (G, Bc).
///
/// `G = sum(connected loads) / V^2`, `Bc = sum(connected capacitors) / V^2`.
pub fn aggregate(config: &SystemConfiguration) -> OperatingPoint {
    let v2 = config.voltage * config.voltage;
    let point = OperatingPoint::new(
        config.connected_total(ComponentKind::Load) / v2,
        config.connected_total(ComponentKind::Capacitor) / v2,
    );
    debug!(
        components = config.components.len(),
        g = point.g,
        bc = point.bc,
        "aggregated configuration"
    );
    point
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> SystemConfiguration {
        SystemConfiguration::new(1.0)
            .unwrap()
            .with(ComponentSpec::load("motor", 0.06))
            .unwrap()
            .with(ComponentSpec::load("heater", 0.04).with_connected(false))
            .unwrap()
            .with(ComponentSpec::capacitor("bank1", 0.12))
            .unwrap()
            .with(ComponentSpec::capacitor("cable", 0.03))
            .unwrap()
    }

    #[test]
    fn test_aggregate_skips_disconnected() {
        let point = aggregate(&sample());
        assert_relative_eq!(point.g, 0.06, epsilon = 1e-12);
        assert_relative_eq!(point.bc, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_scales_by_voltage_squared() {
        let mut config = sample();
        config.set_voltage(2.0).unwrap();
        let point = aggregate(&config);
        assert_relative_eq!(point.g, 0.015, epsilon = 1e-12);
        assert_relative_eq!(point.bc, 0.0375, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_configuration_is_origin() {
        let point = aggregate(&SystemConfiguration::default());
        assert_eq!(point, OperatingPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_toggle_and_edit() {
        let mut config = sample();
        assert!(config.toggle("heater").unwrap());
        config.set_magnitude("bank1", 0.2).unwrap();
        let point = aggregate(&config);
        assert_relative_eq!(point.g, 0.10, epsilon = 1e-12);
        assert_relative_eq!(point.bc, 0.23, epsilon = 1e-12);

        config.set_connected("motor", false).unwrap();
        assert_relative_eq!(aggregate(&config).g, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_edits() {
        let mut config = sample();
        assert!(matches!(
            config.toggle("nope"),
            Err(GenstabError::ComponentNotFound { .. })
        ));
        assert!(config.set_magnitude("motor", -1.0).is_err());
        assert!(matches!(
            config.add(ComponentSpec::load("motor", 0.1)),
            Err(GenstabError::DuplicateComponent { .. })
        ));
        assert!(matches!(
            SystemConfiguration::new(0.0),
            Err(GenstabError::InvalidVoltage { .. })
        ));
    }
}
