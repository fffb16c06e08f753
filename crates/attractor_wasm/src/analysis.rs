//! Statistics bindings for `WasmAttractor`.

use crate::system::{to_js_error, WasmAttractor};
use anyhow::Context;
use attractor_core::statistics::{self, AnalysisSettings, MomentScope};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[derive(Serialize)]
pub(crate) struct KdePayload {
    grids: Vec<Vec<f64>>,
    densities: Vec<Vec<f64>>,
}

impl WasmAttractor {
    pub(crate) fn kde_payload(&mut self, num_samples: usize) -> anyhow::Result<KdePayload> {
        let curves = statistics::kde(self.integrator.run(), num_samples)
            .context("Density estimate failed")?;
        let (grids, densities) = curves
            .into_iter()
            .map(|curve| (curve.grid, curve.density))
            .unzip();
        Ok(KdePayload { grids, densities })
    }

    pub(crate) fn spectrum_curves(&mut self, fft_size: usize) -> anyhow::Result<Vec<Vec<f64>>> {
        let curves = statistics::spectrum(self.integrator.run(), fft_size)
            .context("Spectrum computation failed")?;
        Ok(curves.to_vec())
    }

    pub(crate) fn autocorrelation_curves(&mut self) -> anyhow::Result<Vec<Vec<f64>>> {
        let curves = statistics::autocorrelation(self.integrator.run())
            .context("Autocorrelation failed")?;
        Ok(curves.to_vec())
    }
}

#[wasm_bindgen]
impl WasmAttractor {
    pub fn min_max(&mut self) -> Result<JsValue, JsValue> {
        let bounds = statistics::min_max(self.integrator.run())
            .context("Range computation failed")
            .map_err(to_js_error)?;
        serialize(&bounds)
    }

    /// Per-axis moments, or moments over all coordinates when `global` is set.
    pub fn moments(&mut self, global: bool) -> Result<JsValue, JsValue> {
        let scope = if global {
            MomentScope::Global
        } else {
            MomentScope::PerAxis
        };
        let moments = statistics::moments(self.integrator.run(), scope)
            .context("Moment computation failed")
            .map_err(to_js_error)?;
        serialize(&moments)
    }

    pub fn kde(&mut self, num_samples: u32) -> Result<JsValue, JsValue> {
        let payload = self
            .kde_payload(num_samples as usize)
            .map_err(to_js_error)?;
        serialize(&payload)
    }

    pub fn spectrum(&mut self, fft_size: u32) -> Result<JsValue, JsValue> {
        let curves = self
            .spectrum_curves(fft_size as usize)
            .map_err(to_js_error)?;
        serialize(&curves)
    }

    pub fn autocorrelation(&mut self) -> Result<JsValue, JsValue> {
        let curves = self.autocorrelation_curves().map_err(to_js_error)?;
        serialize(&curves)
    }

    /// Every statistic at once. Zero sizes fall back to the defaults.
    pub fn analyze(&mut self, kde_samples: u32, fft_size: u32) -> Result<JsValue, JsValue> {
        let defaults = AnalysisSettings::default();
        let settings = AnalysisSettings {
            kde_samples: if kde_samples == 0 {
                defaults.kde_samples
            } else {
                kde_samples as usize
            },
            fft_size: if fft_size == 0 {
                defaults.fft_size
            } else {
                fft_size as usize
            },
        };
        let report = statistics::analyze(self.integrator.run(), &settings)
            .context("Trajectory analysis failed")
            .map_err(to_js_error)?;
        serialize(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attractor(system: &str, num_points: i32) -> WasmAttractor {
        WasmAttractor::new(
            system,
            Vec::new(),
            Vec::new(),
            num_points,
            vec![0.1, 0.1, 0.1],
            100.0,
        )
        .expect("attractor should build")
    }

    #[test]
    fn kde_payload_has_one_curve_per_axis() {
        let mut lorenz = attractor("lorenz", 256);
        let payload = lorenz.kde_payload(32).expect("density should compute");
        assert_eq!(payload.grids.len(), 3);
        assert_eq!(payload.densities.len(), 3);
        for density in &payload.densities {
            assert_eq!(density.len(), 32);
            assert_eq!(density.iter().cloned().fold(0.0, f64::max), 1.0);
        }
    }

    #[test]
    fn kde_payload_reports_short_trajectories() {
        let mut single = attractor("wang", 1);
        let err = single.kde_payload(32).err().expect("expected error");
        let message = format!("{err:#}");
        assert!(message.contains("Density estimate failed"));
        assert!(message.contains("at least 2"));
    }

    #[test]
    fn spectrum_and_autocorrelation_sizes() {
        let mut chua = attractor("chua", 300);
        let spectrum = chua.spectrum_curves(128).expect("spectrum should compute");
        assert_eq!(spectrum.len(), 3);
        assert!(spectrum.iter().all(|c| c.len() == 128));

        let correlation = chua
            .autocorrelation_curves()
            .expect("autocorrelation should compute");
        assert!(correlation.iter().all(|c| c.len() == 300));
    }
}
