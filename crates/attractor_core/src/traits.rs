use crate::types::Point3;

/// A three-variable attractor law.
///
/// Maps the current point to the increment the integrator scales and adds to
/// it. Implementations are pure: same point, same increment, no side effects.
pub trait AttractorLaw {
    /// Evaluates the increment `(dx, dy, dz)` at `point`.
    fn step(&self, point: Point3) -> Point3;
}

impl<L: AttractorLaw + ?Sized> AttractorLaw for &L {
    fn step(&self, point: Point3) -> Point3 {
        (**self).step(point)
    }
}

/// A trait for solvers that advance a point by one update.
pub trait Steppable {
    /// Returns the point that follows `point` under `law`.
    fn advance(&self, law: &impl AttractorLaw, point: Point3) -> Point3;
}
