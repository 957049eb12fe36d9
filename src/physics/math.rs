//! Scalar and vector types plus the physical constants shared by the
//! generator, the bootstrap and the integrator.

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and forces (world frame, SI units)
pub type Vector = bevy::math::DVec2;

/// Newtonian gravitational constant, m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.67428e-11;

/// One astronomical unit in metres
pub const AU: Scalar = 1.496e11;

pub const METRES_PER_KILOMETRE: Scalar = 1000.0;

/// Speed of a circular orbit of radius `distance` around a primary of mass
/// `primary_mass`: `v = sqrt(G·M / r)`.
///
/// Returns zero for a non-positive distance instead of dividing by zero.
pub fn circular_orbit_speed(g: Scalar, primary_mass: Scalar, distance: Scalar) -> Scalar {
    if distance <= 0.0 {
        return 0.0;
    }

    libm::sqrt(g * primary_mass / distance)
}

/// Unit vector perpendicular to `offset`, rotated 90° counter-clockwise.
///
/// A zero offset has no defined tangent; `(0, 1)` is used so a satellite
/// sitting exactly on its primary still gets a launch direction.
pub fn counter_clockwise_tangent(offset: Vector) -> Vector {
    let length = offset.length();
    if length == 0.0 {
        return Vector::Y;
    }

    Vector::new(-offset.y / length, offset.x / length)
}
