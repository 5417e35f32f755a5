//! WASM bindings for Genstab Core.
//!
//! This module provides JavaScript-friendly bindings for an interactive
//! browser front end that draws the (G, Bc) plane and the voltage response.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmStabilityEngine } from 'genstab_core';
//!
//! await init();
//!
//! const engine = new WasmStabilityEngine(1.8, 0.3, 5.0, 5.0, 1.0);
//!
//! // Slider mode
//! engine.set_point(gSlider.value, bcSlider.value); // throws on NaN
//!
//! // Or component mode
//! engine.load_scenario(`
//!   LOAD motor 0.06
//!   CAP  bank1 0.12
//! `);
//!
//! drawCircle(0, engine.boundary_center_bc, engine.boundary_radius);
//! plot(engine.simulate());
//! ```

use wasm_bindgen::prelude::*;

use crate::analysis::StabilityReport;
use crate::dsl;
use crate::error::GenstabError;
use crate::network::{OperatingPoint, Scenario};
use crate::params::ParameterSet;
use crate::session::AnalysisSession;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: GenstabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible stability engine.
///
/// Wraps an [`AnalysisSession`]; every getter re-evaluates the current
/// operating point, so the front end only has to push edits.
#[wasm_bindgen]
pub struct WasmStabilityEngine {
    session: AnalysisSession,
}

impl WasmStabilityEngine {
    fn report(&self) -> StabilityReport {
        self.session.evaluate()
    }
}

#[wasm_bindgen]
impl WasmStabilityEngine {
    /// Create an engine for the given machine, starting at the origin.
    ///
    /// # Arguments
    /// * `xd`, `xd_prime`, `xl` - reactances in per-unit
    /// * `td0_prime`, `tq0_prime` - open-circuit time constants in seconds
    #[wasm_bindgen(constructor)]
    pub fn new(
        xd: f64,
        xd_prime: f64,
        xl: f64,
        td0_prime: f64,
        tq0_prime: f64,
    ) -> Result<WasmStabilityEngine, JsValue> {
        let params = ParameterSet::new(xd, xd_prime, xl, td0_prime, tq0_prime).map_err(to_js)?;
        let mut session = AnalysisSession::new(params);
        session
            .set_direct_point(OperatingPoint::default())
            .map_err(to_js)?;
        Ok(WasmStabilityEngine { session })
    }

    /// Replace the machine constants.
    #[wasm_bindgen]
    pub fn set_params(
        &mut self,
        xd: f64,
        xd_prime: f64,
        xl: f64,
        td0_prime: f64,
        tq0_prime: f64,
    ) -> Result<(), JsValue> {
        let params = ParameterSet::new(xd, xd_prime, xl, td0_prime, tq0_prime).map_err(to_js)?;
        self.session.set_params(params);
        Ok(())
    }

    /// Set the operating point directly (slider mode). Rejects NaN and infinities.
    #[wasm_bindgen]
    pub fn set_point(&mut self, g: f64, bc: f64) -> Result<(), JsValue> {
        self.session
            .set_direct_point(OperatingPoint::new(g, bc))
            .map_err(to_js)
    }

    /// Replace machine and point source from scenario text (component mode).
    #[wasm_bindgen]
    pub fn load_scenario(&mut self, text: &str) -> Result<(), JsValue> {
        let ast = dsl::parse(text).map_err(to_js)?;
        let scenario = Scenario::from_ast(ast).map_err(to_js)?;
        self.session = AnalysisSession::from_scenario(scenario);
        Ok(())
    }

    /// Flip a component in or out; returns its new state.
    #[wasm_bindgen]
    pub fn toggle(&mut self, name: &str) -> Result<bool, JsValue> {
        self.session.toggle(name).map_err(to_js)
    }

    /// Change a component's magnitude.
    #[wasm_bindgen]
    pub fn set_magnitude(&mut self, name: &str, magnitude: f64) -> Result<(), JsValue> {
        self.session.set_magnitude(name, magnitude).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn g(&self) -> f64 {
        self.session.operating_point().g
    }

    #[wasm_bindgen(getter)]
    pub fn bc(&self) -> f64 {
        self.session.operating_point().bc
    }

    /// Boundary test result.
    #[wasm_bindgen(getter)]
    pub fn stable(&self) -> bool {
        self.report().stable
    }

    /// Steady-state voltage ratio (999 when singular).
    #[wasm_bindgen(getter)]
    pub fn voltage_ratio(&self) -> f64 {
        self.report().voltage_ratio
    }

    /// True when the point sits on the contour center; treat as unstable.
    #[wasm_bindgen(getter)]
    pub fn singular(&self) -> bool {
        self.report().is_singular()
    }

    #[wasm_bindgen(getter)]
    pub fn eig_real(&self) -> f64 {
        self.report().eigen.real()
    }

    #[wasm_bindgen(getter)]
    pub fn eig_imag(&self) -> f64 {
        self.report().eigen.imag()
    }

    #[wasm_bindgen(getter)]
    pub fn oscillatory(&self) -> bool {
        self.report().eigen.is_oscillatory()
    }

    #[wasm_bindgen(getter)]
    pub fn boundary_center_bc(&self) -> f64 {
        self.report().boundary.center_bc
    }

    #[wasm_bindgen(getter)]
    pub fn boundary_radius(&self) -> f64 {
        self.report().boundary.radius
    }

    /// Radius of the contour for ratio `k`; all contours share center `1/(XL+Xd')`.
    #[wasm_bindgen]
    pub fn contour_radius(&self, k: f64) -> f64 {
        crate::analysis::voltage_contour(self.session.params(), k).radius
    }

    /// Run a fresh disturbance simulation and return the voltage samples.
    ///
    /// Samples are spaced [`crate::analysis::TIME_STEP`] seconds apart starting at 0.
    #[wasm_bindgen]
    pub fn simulate(&self) -> Vec<f64> {
        self.session.simulate().iter().map(|s| s.voltage).collect()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Sample spacing of [`WasmStabilityEngine::simulate`] in seconds.
#[wasm_bindgen]
pub fn time_step() -> f64 {
    crate::analysis::TIME_STEP
}
