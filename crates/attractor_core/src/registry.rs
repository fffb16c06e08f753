//! Name-based selection of attractor laws and run configuration.

use crate::error::{AttractorError, Result};
use crate::integrator::{IntegratorConfig, DEFAULT_NUM_POINTS, DEFAULT_STEP};
use crate::laws::Law;
use crate::types::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Canonical identifiers of every registered law.
pub fn available_systems() -> Vec<&'static str> {
    Law::all().iter().map(Law::name).collect()
}

fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['(', ')'], "")
        .replace(['_', ' ', '–'], "-")
        .replace('ö', "o")
        .replace('é', "e")
}

/// Finds a law by name with its default parameters.
///
/// Matching ignores case, accents and parentheses and treats `_`, spaces and
/// en dashes as `-`, so `"Nose_Hoover"`, `"Nosé–Hoover"` and `"nose-hoover"`
/// are the same system.
pub fn lookup(name: &str) -> Result<Law> {
    let key = normalize(name);
    Law::all()
        .into_iter()
        .find(|law| law.name() == key)
        .ok_or_else(|| AttractorError::UnknownSystem(name.to_string()))
}

/// Finds a law by name and applies named parameter overrides.
///
/// Keys the law does not recognize are ignored with a warning.
pub fn build_law(name: &str, overrides: &BTreeMap<String, f64>) -> Result<Law> {
    let mut law = lookup(name)?;
    for (key, &value) in overrides {
        if !law.set_parameter(key, value) {
            warn!(system = law.name(), parameter = %key, "Ignoring unknown parameter");
        }
    }
    Ok(law)
}

/// User-facing description of one integration run.
///
/// Only `system` is required; everything else falls back to defaults. When
/// `init_point` is absent the law's recommended seed is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub system: String,
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
    #[serde(default = "default_num_points")]
    pub num_points: usize,
    #[serde(default)]
    pub init_point: Option<Point3>,
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

impl RunConfig {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            overrides: BTreeMap::new(),
            num_points: DEFAULT_NUM_POINTS,
            init_point: None,
            step: DEFAULT_STEP,
        }
    }

    /// Resolves the system name and overrides into an integrator configuration.
    pub fn build(&self) -> Result<IntegratorConfig> {
        let law = build_law(&self.system, &self.overrides)?;
        let init_point = self
            .init_point
            .unwrap_or_else(|| law.recommended_init_point());
        Ok(IntegratorConfig::new(law)
            .with_num_points(self.num_points)
            .with_init_point(init_point)
            .with_step(self.step))
    }
}
