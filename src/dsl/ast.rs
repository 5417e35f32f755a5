//! Abstract Syntax Tree types for the scenario format.

use crate::network::ComponentKind;

/// Complete AST representation of a parsed scenario.
#[derive(Debug, Clone, Default)]
pub struct ScenarioAst {
    /// Machine parameter overrides, in source order
    pub machine: Vec<ParamDef>,
    /// Reference voltage from `.voltage`
    pub voltage: Option<VoltageDef>,
    /// Direct operating point from `.point`
    pub point: Option<PointDef>,
    /// Load and capacitor declarations
    pub components: Vec<ComponentDef>,
}

impl ScenarioAst {
    /// Create a new empty scenario AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A `key=value` machine parameter from `.machine`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    /// Parameter key as written (matched case-insensitively later)
    pub key: String,
    /// Parameter value
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// The `.voltage` directive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageDef {
    pub value: f64,
    pub line: usize,
}

/// The `.point` directive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDef {
    /// Per-unit conductance
    pub g: f64,
    /// Per-unit capacitive susceptance
    pub bc: f64,
    /// Source line number
    pub line: usize,
}

/// A load or capacitor declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    /// Load or capacitor
    pub kind: ComponentKind,
    /// Unique component name
    pub name: String,
    /// Rated magnitude
    pub magnitude: f64,
    /// `on` (default) or `off`
    pub connected: bool,
    /// Source line number for error reporting
    pub line: usize,
}
