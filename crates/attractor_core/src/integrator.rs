//! Forward integration of an attractor law into a trajectory.

use crate::error::{AttractorError, Result};
use crate::laws::{Law, Lorenz};
use crate::solvers::ScaledEuler;
use crate::traits::{AttractorLaw, Steppable};
use crate::types::{Point3, Trajectory};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_NUM_POINTS: usize = 1024;
pub const DEFAULT_STEP: f64 = 100.0;

/// Everything that identifies a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig<L = Law> {
    pub law: L,
    pub num_points: usize,
    pub init_point: Point3,
    pub step: f64,
}

impl<L> IntegratorConfig<L> {
    pub fn new(law: L) -> Self {
        Self {
            law,
            num_points: DEFAULT_NUM_POINTS,
            init_point: Point3::default(),
            step: DEFAULT_STEP,
        }
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_init_point(mut self, init_point: impl Into<Point3>) -> Self {
        self.init_point = init_point.into();
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

impl Default for IntegratorConfig<Law> {
    fn default() -> Self {
        Self::new(Law::Lorenz(Lorenz::default()))
    }
}

/// Integrates `law` from `init_point`, returning exactly `num_points` points.
///
/// Divergence is not detected: the loop always runs to completion and
/// non-finite values are kept as they are.
pub fn integrate(
    law: &impl AttractorLaw,
    init_point: Point3,
    step: f64,
    num_points: usize,
) -> Result<Trajectory> {
    let stepper = ScaledEuler::new(step)?;
    if !init_point.is_finite() {
        return Err(AttractorError::InvalidInitPoint(init_point));
    }
    Ok(run_steps(&stepper, law, init_point, num_points))
}

fn run_steps(
    stepper: &impl Steppable,
    law: &impl AttractorLaw,
    init_point: Point3,
    num_points: usize,
) -> Trajectory {
    let mut points = Vec::with_capacity(num_points);
    if num_points > 0 {
        let mut current = init_point;
        points.push(current);
        for _ in 1..num_points {
            current = stepper.advance(law, current);
            points.push(current);
        }
    }
    Trajectory::new(points)
}

/// Where an [`Integrator`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorStage {
    /// Configured; no trajectory held.
    Seeded,
    /// Trajectory generated and cached.
    Generated,
}

/// Owns a validated configuration and lazily generates its trajectory.
///
/// `run` generates once and then hands back the cached trajectory;
/// `reset` drops the cache so the next `run` replays the same computation.
#[derive(Debug, Clone)]
pub struct Integrator<L = Law> {
    law: L,
    stepper: ScaledEuler,
    init_point: Point3,
    num_points: usize,
    trajectory: Option<Trajectory>,
}

impl<L: AttractorLaw> Integrator<L> {
    pub fn new(config: IntegratorConfig<L>) -> Result<Self> {
        let stepper = ScaledEuler::new(config.step)?;
        if !config.init_point.is_finite() {
            return Err(AttractorError::InvalidInitPoint(config.init_point));
        }
        Ok(Self {
            law: config.law,
            stepper,
            init_point: config.init_point,
            num_points: config.num_points,
            trajectory: None,
        })
    }

    pub fn stage(&self) -> IntegratorStage {
        match self.trajectory {
            Some(_) => IntegratorStage::Generated,
            None => IntegratorStage::Seeded,
        }
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn init_point(&self) -> Point3 {
        self.init_point
    }

    pub fn step(&self) -> f64 {
        self.stepper.step()
    }

    /// Returns the trajectory, generating it on first use.
    pub fn run(&mut self) -> &Trajectory {
        let Self {
            law,
            stepper,
            init_point,
            num_points,
            trajectory,
        } = self;
        trajectory.get_or_insert_with(|| {
            debug!(
                num_points = *num_points,
                step = stepper.step(),
                "Integrating attractor trajectory"
            );
            let generated = run_steps(&*stepper, &*law, *init_point, *num_points);
            if !generated.is_finite() {
                warn!(
                    num_points = *num_points,
                    "Trajectory diverged to non-finite values"
                );
            }
            generated
        })
    }

    /// Drops the cached trajectory and returns to [`IntegratorStage::Seeded`].
    pub fn reset(&mut self) {
        self.trajectory = None;
    }

    /// Consumes the integrator, generating the trajectory if needed.
    pub fn into_trajectory(mut self) -> Trajectory {
        self.run();
        self.trajectory.unwrap_or_default()
    }
}
