//! Error types for the Genstab stability engine.
//!
//! This module provides a unified error type [`GenstabError`] covering the
//! configuration boundary: scenario parsing, machine parameter validation and
//! system configuration edits. The numerical routines in [`crate::analysis`]
//! never fail; singular operating points are reported through sentinel values.

use thiserror::Error;

/// Result type alias using [`GenstabError`].
pub type Result<T> = std::result::Result<T, GenstabError>;

/// Unified error type for all Genstab operations.
#[derive(Error, Debug)]
pub enum GenstabError {
    // ============ Scenario Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    // ============ Configuration Errors ============
    /// Invalid or unknown machine parameter
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// Machine parameters violate Xd > Xd' > 0, XL > 0, Td0' > 0, Tq0' > 0
    #[error("Invalid machine parameters: {message}")]
    InvalidMachineParameters { message: String },

    /// Reference voltage must be positive and finite
    #[error("Invalid reference voltage {value} (must be > 0)")]
    InvalidVoltage { value: f64 },

    /// Direct operating point with a non-finite coordinate
    #[error("Invalid operating point (G={g}, Bc={bc}): coordinates must be finite")]
    InvalidOperatingPoint { g: f64, bc: f64 },

    /// Duplicate component name
    #[error("Duplicate component name '{name}'")]
    DuplicateComponent { name: String },

    /// Component not present in the configuration
    #[error("Component '{name}' not found in configuration")]
    ComponentNotFound { name: String },

    /// A scenario mixes components with a direct operating point
    #[error("Conflicting entry modes: {message}")]
    ConflictingEntryModes { message: String },

    // ============ I/O Errors ============
    /// Error reading scenario file
    #[error("Failed to read scenario file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing report or trajectory output
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl GenstabError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid machine parameters error
    pub fn machine(message: impl Into<String>) -> Self {
        Self::InvalidMachineParameters {
            message: message.into(),
        }
    }
}
