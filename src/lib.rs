//! # Genstab Core
//!
//! Self-excitation stability analysis for a generator feeding a load network
//! through a line.
//!
//! The network is reduced to two numbers, conductance `G` and capacitive
//! susceptance `Bc`. This library provides:
//! - Aggregation of switchable loads and capacitors into `(G, Bc)`
//! - The analytic self-excitation boundary and equal-voltage-ratio contours
//! - Eigenvalue-based classification of any operating point
//! - A synthetic post-disturbance voltage trajectory
//!
//! ## Architecture
//!
//! - [`params`] - Machine reactances and time constants
//! - [`network`] - Load network, aggregation and scenario assembly
//! - [`analysis`] - The stateless numerical engine
//! - [`dsl`] - Parser for the scenario description format
//! - [`session`] - Caller-owned mutable state with explicit re-evaluation
//! - [`report`] - Text and CSV output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! genstab analyze island.gs
//! genstab simulate island.gs -o response.csv
//! genstab contours island.gs -k 1 -k 2
//! ```
//!
//! ### Library
//!
//! ```
//! use genstab_core::{aggregate, classify, eigen, simulate, stability_boundary};
//! use genstab_core::network::{ComponentSpec, SystemConfiguration};
//! use genstab_core::ParameterSet;
//!
//! let params = ParameterSet::default();
//! let config = SystemConfiguration::new(1.0)?
//!     .with(ComponentSpec::load("motor", 0.1))?
//!     .with(ComponentSpec::capacitor("bank", 0.15))?;
//!
//! let point = aggregate(&config);
//! let boundary = stability_boundary(&params);
//! assert!(classify(point, &boundary));
//! assert!(eigen(point, &params).is_stable());
//! assert_eq!(simulate(point, &params).len(), 401);
//! # Ok::<(), genstab_core::GenstabError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmStabilityEngine } from 'genstab_core';
//!
//! const engine = new WasmStabilityEngine(1.8, 0.3, 5.0, 5.0, 1.0);
//! engine.set_point(0.1, 0.15);
//! const voltages = engine.simulate();
//! ```

pub mod analysis;
pub mod dsl;
pub mod error;
pub mod network;
pub mod params;
pub mod session;

#[cfg(feature = "cli")]
pub mod report;

// Re-export the functional surface
pub use analysis::{
    classify, eigen, simulate, stability_boundary, voltage_contour, voltage_contours, voltage_ratio,
    EigenResult, StabilityCircle, StabilityReport, Trajectory, TrajectorySample,
};
pub use error::{GenstabError, Result};
pub use network::{aggregate, OperatingPoint, Scenario, SystemConfiguration};
pub use params::ParameterSet;
pub use session::AnalysisSession;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmStabilityEngine;

/// Voltage ratios drawn as contours when none are requested.
pub const DEFAULT_CONTOUR_RATIOS: [f64; 4] = [0.5, 1.0, 2.0, 5.0];
