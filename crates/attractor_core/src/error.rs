use crate::types::{Axis, Point3};
use thiserror::Error;

/// Failures reported by the attractor core.
///
/// Configuration errors abort before any trajectory is generated. Divergent
/// trajectories are not errors; callers inspect them with
/// [`crate::statistics::min_max`] or [`crate::types::Trajectory::is_finite`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttractorError {
    #[error("Unknown dynamical system \"{0}\".")]
    UnknownSystem(String),
    #[error("Step must be positive and finite, got {0}.")]
    InvalidStep(f64),
    #[error("Initial point must be finite, got {0:?}.")]
    InvalidInitPoint(Point3),
    #[error("{operation} requires at least {required} point(s), trajectory has {actual}.")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("{0} must be greater than zero.")]
    InvalidArgument(&'static str),
    #[error("{axis} coordinate has zero spread; density estimate is undefined.")]
    DegenerateAxis { axis: Axis },
    #[error("{operation} requires finite coordinates; the {axis} series is not finite.")]
    NonFinite {
        operation: &'static str,
        axis: Axis,
    },
}

pub type Result<T> = std::result::Result<T, AttractorError>;
