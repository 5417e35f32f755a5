//! Machine and network constants.

use std::fmt;

use crate::error::{GenstabError, Result};

/// Reactances and open-circuit time constants of the generator and its tie line.
///
/// All values are per-unit (reactances) or seconds (time constants). A
/// `ParameterSet` is immutable once built; editing a value produces a new set
/// through [`ParameterSet::with_param`], which revalidates the invariants
/// `Xd > Xd' > 0`, `XL > 0`, `Td0' > 0` and `Tq0' > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    xd: f64,
    xd_prime: f64,
    xl: f64,
    td0_prime: f64,
    tq0_prime: f64,
}

impl ParameterSet {
    /// Build a validated parameter set.
    pub fn new(xd: f64, xd_prime: f64, xl: f64, td0_prime: f64, tq0_prime: f64) -> Result<Self> {
        let params = Self {
            xd,
            xd_prime,
            xl,
            td0_prime,
            tq0_prime,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("Xd", self.xd),
            ("Xd'", self.xd_prime),
            ("XL", self.xl),
            ("Td0'", self.td0_prime),
            ("Tq0'", self.tq0_prime),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(GenstabError::machine(format!(
                    "{} must be finite and > 0, got {}",
                    name, value
                )));
            }
        }

        if self.xd <= self.xd_prime {
            return Err(GenstabError::machine(format!(
                "Xd ({}) must exceed Xd' ({})",
                self.xd, self.xd_prime
            )));
        }

        Ok(())
    }

    /// Return a copy with one parameter replaced by name.
    ///
    /// Accepted keys (case-insensitive): `xd`, `xdp`/`xd_prime`, `xl`,
    /// `td0p`/`td0_prime`, `tq0p`/`tq0_prime`.
    pub fn with_param(&self, key: &str, value: f64) -> Result<Self> {
        self.with_params([(key, value)])
    }

    /// Apply several named overrides, validating only the final set.
    pub fn with_params<'a>(&self, overrides: impl IntoIterator<Item = (&'a str, f64)>) -> Result<Self> {
        let mut next = *self;
        for (key, value) in overrides {
            let slot = match key.to_ascii_lowercase().as_str() {
                "xd" => &mut next.xd,
                "xdp" | "xd_prime" => &mut next.xd_prime,
                "xl" => &mut next.xl,
                "td0p" | "td0_prime" => &mut next.td0_prime,
                "tq0p" | "tq0_prime" => &mut next.tq0_prime,
                _ => {
                    return Err(GenstabError::InvalidParameter {
                        param: key.to_string(),
                        message: "expected one of xd, xdp, xl, td0p, tq0p".to_string(),
                    })
                }
            };
            *slot = value;
        }
        next.validate()?;
        Ok(next)
    }

    /// Synchronous reactance Xd.
    pub fn xd(&self) -> f64 {
        self.xd
    }

    /// Transient reactance Xd'.
    pub fn xd_prime(&self) -> f64 {
        self.xd_prime
    }

    /// Line reactance XL.
    pub fn xl(&self) -> f64 {
        self.xl
    }

    /// d-axis open-circuit transient time constant Td0'.
    pub fn td0_prime(&self) -> f64 {
        self.td0_prime
    }

    /// q-axis open-circuit transient time constant Tq0'.
    pub fn tq0_prime(&self) -> f64 {
        self.tq0_prime
    }

    /// Transient reactance seen through the line, `XL + Xd'`.
    pub fn transient_reactance(&self) -> f64 {
        self.xl + self.xd_prime
    }

    /// Synchronous reactance seen through the line, `XL + Xd`.
    pub fn synchronous_reactance(&self) -> f64 {
        self.xl + self.xd
    }

    /// Reactance drop from synchronous to transient, `Xd - Xd'`.
    pub fn reactance_gap(&self) -> f64 {
        self.xd - self.xd_prime
    }
}

impl Default for ParameterSet {
    /// Reference machine: Xd 1.8, Xd' 0.3, XL 5.0, Td0' 5.0 s, Tq0' 1.0 s.
    fn default() -> Self {
        Self {
            xd: 1.8,
            xd_prime: 0.3,
            xl: 5.0,
            td0_prime: 5.0,
            tq0_prime: 1.0,
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Xd={} Xd'={} XL={} Td0'={}s Tq0'={}s",
            self.xd, self.xd_prime, self.xl, self.td0_prime, self.tq0_prime
        )
    }
}
