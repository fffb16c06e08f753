//! Core WASM attractor wrapper.

use anyhow::{bail, Context};
use attractor_core::registry::build_law;
use attractor_core::{Axis, Integrator, IntegratorConfig, IntegratorStage, Point3};
use js_sys::Float64Array;
use std::collections::BTreeMap;
use tracing::debug;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmAttractor {
    pub(crate) integrator: Integrator,
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

pub(crate) fn build_integrator(
    system_name: &str,
    param_values: &[f64],
    param_names: &[String],
    num_points: i32,
    init_point: &[f64],
    step: f64,
) -> anyhow::Result<Integrator> {
    if param_values.len() != param_names.len() {
        bail!(
            "Parameter names and values differ in length ({} names, {} values).",
            param_names.len(),
            param_values.len()
        );
    }
    let init_point = match init_point {
        [x, y, z] => Point3::new(*x, *y, *z),
        _ => bail!(
            "Initial point must have 3 coordinates, got {}.",
            init_point.len()
        ),
    };

    let overrides: BTreeMap<String, f64> = param_names
        .iter()
        .cloned()
        .zip(param_values.iter().copied())
        .collect();
    let law = build_law(system_name, &overrides)
        .with_context(|| format!("Failed to select system \"{system_name}\""))?;

    // Negative counts behave like an empty request.
    let num_points = usize::try_from(num_points).unwrap_or(0);
    let config = IntegratorConfig::new(law)
        .with_num_points(num_points)
        .with_init_point(init_point)
        .with_step(step);
    debug!(system = law.name(), num_points, step, "Configuring attractor");
    Integrator::new(config).context("Invalid integrator configuration")
}

#[wasm_bindgen]
impl WasmAttractor {
    #[wasm_bindgen(constructor)]
    pub fn new(
        system_name: &str,
        param_values: Vec<f64>,
        param_names: Vec<String>,
        num_points: i32,
        init_point: Vec<f64>,
        step: f64,
    ) -> Result<WasmAttractor, JsValue> {
        console_error_panic_hook::set_once();

        let integrator = build_integrator(
            system_name,
            &param_values,
            &param_names,
            num_points,
            &init_point,
            step,
        )
        .map_err(to_js_error)?;
        Ok(WasmAttractor { integrator })
    }

    pub fn name(&self) -> String {
        self.integrator.law().name().to_string()
    }

    pub fn display_name(&self) -> String {
        self.integrator.law().display_name().to_string()
    }

    pub fn parameter_names(&self) -> Vec<String> {
        self.integrator
            .law()
            .parameters()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub fn parameter_values(&self) -> Vec<f64> {
        self.integrator
            .law()
            .parameters()
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// Number of points, generating the trajectory if needed.
    pub fn len(&mut self) -> usize {
        self.integrator.run().len()
    }

    pub fn is_generated(&self) -> bool {
        self.integrator.stage() == IntegratorStage::Generated
    }

    /// Trajectory as a flat row-major `[x0, y0, z0, x1, ...]` buffer.
    pub fn coordinates(&mut self) -> Float64Array {
        Float64Array::from(self.integrator.run().to_flat().as_slice())
    }

    /// Coordinates of a single axis (0 = X, 1 = Y, 2 = Z).
    pub fn axis(&mut self, index: usize) -> Result<Float64Array, JsValue> {
        let axis = *Axis::ALL
            .get(index)
            .ok_or_else(|| JsValue::from_str("Axis index must be 0, 1 or 2."))?;
        Ok(Float64Array::from(self.integrator.run().axis(axis).as_slice()))
    }

    pub fn reset(&mut self) {
        self.integrator.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorenz(num_points: i32) -> WasmAttractor {
        WasmAttractor::new(
            "lorenz",
            Vec::new(),
            Vec::new(),
            num_points,
            vec![0.1, 0.1, 0.1],
            100.0,
        )
        .expect("attractor should build")
    }

    fn assert_err_contains<T>(result: anyhow::Result<T>, needle: &str) {
        let Err(err) = result else {
            panic!("expected error containing \"{needle}\"");
        };
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn build_integrator_rejects_invalid_inputs() {
        assert_err_contains(
            build_integrator("lorenz", &[], &[], 10, &[0.1, 0.1, 0.1], 0.0),
            "Step must be positive",
        );
        assert_err_contains(
            build_integrator("henon", &[], &[], 10, &[0.1, 0.1, 0.1], 100.0),
            "Unknown dynamical system",
        );
        assert_err_contains(
            build_integrator("lorenz", &[], &[], 10, &[0.1, 0.1], 100.0),
            "3 coordinates",
        );
        assert_err_contains(
            build_integrator("lorenz", &[1.0], &[], 10, &[0.1, 0.1, 0.1], 100.0),
            "differ in length",
        );
    }

    #[test]
    fn negative_point_count_yields_empty_trajectory() {
        let mut attractor = lorenz(-10);
        assert_eq!(attractor.len(), 0);
        assert!(attractor.integrator.run().is_empty());
    }

    #[test]
    fn reset_returns_to_seeded_and_replays() {
        let mut attractor = lorenz(64);
        assert!(!attractor.is_generated());
        let first = attractor.integrator.run().to_flat();
        assert!(attractor.is_generated());
        attractor.reset();
        assert!(!attractor.is_generated());
        assert_eq!(first, attractor.integrator.run().to_flat());
    }

    #[test]
    fn overrides_are_applied_by_name() {
        let attractor = WasmAttractor::new(
            "Rossler",
            vec![0.1, 9.0],
            vec!["a".to_string(), "unknown".to_string()],
            8,
            vec![0.1, 0.1, 0.1],
            100.0,
        )
        .expect("attractor should build");
        assert_eq!(attractor.name(), "rossler");
        assert_eq!(attractor.display_name(), "Rössler");
        assert_eq!(attractor.parameter_names(), vec!["a", "b", "c"]);
        assert_eq!(attractor.parameter_values(), vec![0.1, 0.2, 5.7]);
    }

    #[cfg(target_arch = "wasm32")]
    mod wasm {
        use super::*;
        use wasm_bindgen_test::wasm_bindgen_test;

        #[wasm_bindgen_test]
        fn constructor_rejects_unknown_system() {
            let result =
                WasmAttractor::new("nope", Vec::new(), Vec::new(), 10, vec![0.1; 3], 100.0);
            let message = result
                .err()
                .and_then(|err| err.as_string())
                .unwrap_or_default();
            assert!(message.contains("Unknown dynamical system \"nope\""));
        }

        #[wasm_bindgen_test]
        fn coordinates_are_flat_row_major() {
            let mut attractor = lorenz(4);
            let flat = attractor.coordinates().to_vec();
            assert_eq!(flat.len(), 12);
            assert_eq!(&flat[..3], &[0.1, 0.1, 0.1]);
            let x = attractor.axis(0).expect("valid axis").to_vec();
            assert_eq!(x, vec![flat[0], flat[3], flat[6], flat[9]]);
            assert!(attractor.axis(3).is_err());
        }
    }
}
