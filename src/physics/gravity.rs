//! Direct pairwise Newtonian gravity (O(N²))

use crate::physics::body::Body;
use crate::physics::math::{Scalar, Vector};

/// Force exerted on a body of mass `mass` at `position` by another body of
/// mass `other_mass` at `other_position`: `F = G·m1·m2 / d²` along the
/// connecting vector.
///
/// Coincident positions (self pairs included) yield exactly zero force.
pub fn attraction(
    position: Vector,
    mass: Scalar,
    other_position: Vector,
    other_mass: Scalar,
    g: Scalar,
) -> Vector {
    let delta = other_position - position;
    let distance = libm::sqrt(delta.x * delta.x + delta.y * delta.y);
    if distance == 0.0 {
        return Vector::ZERO;
    }

    let force = g * mass * other_mass / (distance * distance);
    let theta = libm::atan2(delta.y, delta.x);

    Vector::new(libm::cos(theta) * force, libm::sin(theta) * force)
}

/// Net force on the body at `index` from every other body in `bodies`
pub fn net_force(bodies: &[Body], index: usize, g: Scalar) -> Vector {
    let body = &bodies[index];

    bodies
        .iter()
        .enumerate()
        .filter(|(other_index, _)| *other_index != index)
        .map(|(_, other)| attraction(body.position, body.mass, other.position, other.mass, g))
        .fold(Vector::ZERO, |total, force| total + force)
}

/// `F / m`, or zero for a massless body
pub fn acceleration(bodies: &[Body], index: usize, g: Scalar) -> Vector {
    let mass = bodies[index].mass;
    if mass <= 0.0 {
        return Vector::ZERO;
    }

    net_force(bodies, index, g) / mass
}

/// `-G·m1·m2 / d`, zero for coincident bodies
pub fn potential_energy(a: &Body, b: &Body, g: Scalar) -> Scalar {
    let distance = a.distance_to(b);
    if distance == 0.0 {
        return 0.0;
    }

    -g * a.mass * b.mass / distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::math::{AU, GRAVITATIONAL_CONSTANT};

    const G: Scalar = GRAVITATIONAL_CONSTANT;

    #[test]
    fn test_attraction_points_towards_other_body() {
        let force = attraction(Vector::ZERO, 1.0e24, Vector::new(AU, 0.0), 2.0e30, G);

        assert!(force.x > 0.0);
        assert!(force.y.abs() < force.x * 1e-12);

        let expected = G * 1.0e24 * 2.0e30 / (AU * AU);
        assert!((force.length() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_newton_third_law() {
        let a = Vector::new(-3.0e10, 7.0e9);
        let b = Vector::new(4.5e10, -2.0e10);

        let on_a = attraction(a, 5.0e24, b, 8.0e26, G);
        let on_b = attraction(b, 8.0e26, a, 5.0e24, G);

        let sum = on_a + on_b;
        assert!(sum.length() <= on_a.length() * 1e-12, "sum was {sum:?}");
        assert!((on_a.length() - on_b.length()).abs() <= on_a.length() * 1e-12);
    }

    #[test]
    fn test_attraction_vanishes_with_distance() {
        let near = attraction(Vector::ZERO, 1.0e24, Vector::new(AU, 0.0), 2.0e30, G);
        let far = attraction(Vector::ZERO, 1.0e24, Vector::new(1.0e6 * AU, 0.0), 2.0e30, G);

        assert!(far.length() < near.length() * 1e-11);
    }

    #[test]
    fn test_zero_separation_gives_zero_force() {
        let p = Vector::new(12.0, -4.0);
        let force = attraction(p, 1.0e24, p, 2.0e30, G);

        assert_eq!(force, Vector::ZERO);
        assert!(force.is_finite());
    }

    #[test]
    fn test_net_force_skips_self_and_sums_others() {
        let bodies = vec![
            Body::new("A", Vector::new(-1.0, 0.0), 1.0, 1.0e10),
            Body::new("B", Vector::ZERO, 1.0, 1.0e10),
            Body::new("C", Vector::new(1.0, 0.0), 1.0, 1.0e10),
        ];

        // B sits between two equal masses
        assert!(net_force(&bodies, 1, G).length() < 1e-12);
        assert!(net_force(&bodies, 0, G).x > 0.0);
        assert!(net_force(&bodies, 2, G).x < 0.0);
    }

    #[test]
    fn test_acceleration_of_massless_body_is_zero() {
        let bodies = vec![
            Body::new("Dust", Vector::ZERO, 1.0, 0.0),
            Body::new("Sun", Vector::new(AU, 0.0), 1.0, 2.0e30),
        ];

        assert_eq!(acceleration(&bodies, 0, G), Vector::ZERO);
    }
}
