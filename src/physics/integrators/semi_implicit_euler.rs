//! Fixed-step Euler update used by the simulator

use super::Integrator;
use crate::physics::math::{Scalar, Vector};

/// Forward Euler with the velocity updated first (semi-implicit Euler)
///
/// ```text
/// v(t+dt) = v(t) + a(t) * dt
/// x(t+dt) = x(t) + v(t+dt) * dt
/// ```
///
/// There is no step-size control. Energy drifts slowly over long runs and
/// that drift is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar) {
        *velocity += acceleration * dt;
        *position += *velocity * dt;
    }

    fn name(&self) -> &str {
        "Semi-implicit Euler"
    }

    fn order(&self) -> usize {
        1
    }
}
