//! The fixed-timestep force accumulation and integration loop

use crate::physics::gravity;
use crate::physics::integrators::Integrator;
use crate::physics::math::{GRAVITATIONAL_CONSTANT, Scalar, Vector};
use crate::physics::system::StarSystem;
use serde::{Deserialize, Serialize};

/// How forces within one step see the positions of other bodies
#[derive(
    Serialize, Deserialize, clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Every force is evaluated against the positions at the start of the step
    #[default]
    Simultaneous,
    /// Bodies are integrated one at a time; later bodies in the pass see the
    /// already-moved earlier ones
    Sequential,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsSettings {
    pub gravitational_constant: Scalar,
    /// Seconds of simulated time per Euler step
    pub timestep: Scalar,
    /// Euler steps per rendered frame
    pub substeps: usize,
    pub update_order: UpdateOrder,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            timestep: 150.0,
            substeps: 48,
            update_order: UpdateOrder::default(),
        }
    }
}

impl PhysicsSettings {
    /// Number of fixed steps that cover `seconds_per_frame`, never fewer than one
    pub fn substeps_for(seconds_per_frame: Scalar, timestep: Scalar) -> usize {
        if timestep <= 0.0 || !seconds_per_frame.is_finite() {
            return 1;
        }

        ((seconds_per_frame / timestep).floor() as usize).max(1)
    }

    /// Single-step settings with the default gravitational constant
    pub fn with_timestep(timestep: Scalar, update_order: UpdateOrder) -> Self {
        Self {
            timestep,
            substeps: 1,
            update_order,
            ..Self::default()
        }
    }

    pub fn seconds_per_frame(&self) -> Scalar {
        self.timestep * self.substeps as Scalar
    }
}

/// Advances every non-fixed body by one `settings.timestep`.
pub fn step(system: &mut StarSystem, settings: &PhysicsSettings, integrator: &dyn Integrator) {
    let g = settings.gravitational_constant;
    let dt = settings.timestep;

    match settings.update_order {
        UpdateOrder::Simultaneous => step_simultaneous(system, integrator, g, dt),
        UpdateOrder::Sequential => step_sequential(system, integrator, g, dt),
    }
}

fn step_simultaneous(system: &mut StarSystem, integrator: &dyn Integrator, g: Scalar, dt: Scalar) {
    let accelerations: Vec<Option<Vector>> = {
        let bodies = system.bodies();
        (0..bodies.len())
            .map(|index| (!bodies[index].is_fixed).then(|| gravity::acceleration(bodies, index, g)))
            .collect()
    };

    for (body, acceleration) in system.bodies_mut().iter_mut().zip(accelerations) {
        if let Some(acceleration) = acceleration {
            integrator.step(&mut body.position, &mut body.velocity, acceleration, dt);
        }
    }

    for index in 0..system.len() {
        record_trail_sample(system, index);
    }
}

fn step_sequential(system: &mut StarSystem, integrator: &dyn Integrator, g: Scalar, dt: Scalar) {
    for index in 0..system.len() {
        if system.bodies()[index].is_fixed {
            continue;
        }

        let acceleration = gravity::acceleration(system.bodies(), index, g);
        let body = &mut system.bodies_mut()[index];
        integrator.step(&mut body.position, &mut body.velocity, acceleration, dt);

        record_trail_sample(system, index);
    }
}

/// Samples relative to a moving primary, absolute otherwise. Fixed bodies
/// keep no trail.
fn record_trail_sample(system: &mut StarSystem, index: usize) {
    let bodies = system.bodies_mut();
    let body = &bodies[index];
    if body.is_fixed {
        return;
    }

    let sample = match body.primary.map(|primary| &bodies[primary.index()]) {
        Some(primary) if !primary.is_fixed => body.position - primary.position,
        _ => body.position,
    };

    bodies[index].trail.push(sample);
}
