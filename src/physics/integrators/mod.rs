//! Fixed-step numerical integration for the n-body simulation

use crate::physics::math::{Scalar, Vector};

pub mod semi_implicit_euler;

pub use semi_implicit_euler::SemiImplicitEuler;

/// Advances one body's kinematic state given its acceleration.
///
/// The acceleration is computed by the caller, which is what lets the
/// simulation choose between snapshot and sequential force evaluation
/// without the integrator knowing about other bodies.
pub trait Integrator: Send + Sync {
    /// Advance a single body's state by one time step
    ///
    /// # Arguments
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity vector
    /// * `acceleration` - Acceleration at the start of the step
    /// * `dt` - Time step, seconds
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar);

    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Get the order of this integrator
    fn order(&self) -> usize;
}
