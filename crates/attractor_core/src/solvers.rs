use crate::error::{AttractorError, Result};
use crate::traits::{AttractorLaw, Steppable};
use crate::types::Point3;

/// First-order explicit update `next = current + increment / step`.
///
/// `step` is a divisor rather than a time step: larger values give finer,
/// slower integration. No error control is performed, so unstable laws are
/// free to diverge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledEuler {
    step: f64,
}

impl ScaledEuler {
    pub fn new(step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(AttractorError::InvalidStep(step));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Steppable for ScaledEuler {
    fn advance(&self, law: &impl AttractorLaw, point: Point3) -> Point3 {
        // Divide each component; multiplying by 1/step would change the bits.
        point + law.step(point) / self.step
    }
}
