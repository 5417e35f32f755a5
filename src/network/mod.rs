//! Load network representation and the two operating-point entry points.
//!
//! An [`OperatingPoint`] is either aggregated from a [`SystemConfiguration`]
//! of switchable loads and capacitors with [`aggregate`], or set directly
//! with [`OperatingPoint::new`]. Everything downstream only sees the point.

mod config;
mod scenario;
mod types;

pub use config::{aggregate, SystemConfiguration, DEFAULT_VOLTAGE};
pub use scenario::{PointSource, Scenario};
pub use types::*;
