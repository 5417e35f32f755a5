//! Core types for the load network.

use std::fmt;

use crate::error::{GenstabError, Result};

/// What a component contributes to the aggregate admittance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Active-power load, contributes to conductance G
    Load,
    /// Capacitor bank or cable charging, contributes to susceptance Bc
    Capacitor,
}

impl ComponentKind {
    /// Parse a component kind from its scenario prefix (`R` load, `C` capacitor).
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Load),
            'C' => Some(Self::Capacitor),
            _ => None,
        }
    }

    /// Parse a component kind from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "LOAD" => Some(Self::Load),
            "CAP" | "CAPACITOR" => Some(Self::Capacitor),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Capacitor => write!(f, "capacitor"),
        }
    }
}

/// A named load or capacitor that can be switched in or out.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    /// Unique component name
    pub name: String,
    /// Load or capacitor
    pub kind: ComponentKind,
    /// Power rating in per-unit (active for loads, reactive for capacitors)
    pub magnitude: f64,
    /// Whether the component is currently connected
    pub connected: bool,
}

impl ComponentSpec {
    /// Create a connected component.
    pub fn new(name: impl Into<String>, kind: ComponentKind, magnitude: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            magnitude,
            connected: true,
        }
    }

    /// Create a load.
    pub fn load(name: impl Into<String>, magnitude: f64) -> Self {
        Self::new(name, ComponentKind::Load, magnitude)
    }

    /// Create a capacitor.
    pub fn capacitor(name: impl Into<String>, magnitude: f64) -> Self {
        Self::new(name, ComponentKind::Capacitor, magnitude)
    }

    /// Builder-style connection state.
    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Magnitude this component contributes right now (zero when disconnected).
    pub fn contribution(&self) -> f64 {
        if self.connected {
            self.magnitude
        } else {
            0.0
        }
    }
}

/// A point in the (G, Bc) admittance plane.
///
/// Either derived from a [`super::SystemConfiguration`] through
/// [`super::aggregate`] or set directly with [`OperatingPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OperatingPoint {
    /// Per-unit conductance
    pub g: f64,
    /// Per-unit capacitive susceptance
    pub bc: f64,
}

impl OperatingPoint {
    /// Set an operating point directly.
    pub fn new(g: f64, bc: f64) -> Self {
        Self { g, bc }
    }

    /// Set an operating point from untrusted input, rejecting NaN and infinities.
    pub fn checked(g: f64, bc: f64) -> Result<Self> {
        let point = Self::new(g, bc);
        if point.is_finite() {
            Ok(point)
        } else {
            Err(GenstabError::InvalidOperatingPoint { g, bc })
        }
    }

    pub fn is_finite(&self) -> bool {
        self.g.is_finite() && self.bc.is_finite()
    }
}

impl fmt::Display for OperatingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(G={:.5}, Bc={:.5})", self.g, self.bc)
    }
}
