pub mod error;
pub mod integrator;
pub mod laws;
pub mod registry;
pub mod solvers;
pub mod statistics;
/// The `attractor_core` crate integrates classical three-dimensional chaotic
/// systems and analyses the trajectories they trace.
///
/// Key components:
/// - **Traits**: `AttractorLaw` (step function of a system), `Steppable` (update rule).
/// - **Laws**: Lorenz, Rössler, Rikitake, Nosé–Hoover, Wang, two Duffing forms,
///   two Chua forms and Lotka–Volterra, dispatched through the `Law` enum.
/// - **Integrator**: scaled forward Euler iteration with a cached, replayable trajectory.
/// - **Statistics**: extremes, moments, kernel density, spectrum and autocorrelation.
/// - **Registry**: case-insensitive name lookup, parameter overrides and run configuration.
pub mod traits;
pub mod types;

pub use error::{AttractorError, Result};
pub use integrator::{integrate, Integrator, IntegratorConfig, IntegratorStage};
pub use laws::Law;
pub use types::{Axis, Point3, Trajectory};
