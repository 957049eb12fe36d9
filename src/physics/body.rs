//! Celestial body records stored in the [`StarSystem`](super::system::StarSystem) arena

use crate::physics::math::{Scalar, Vector};
use crate::physics::trail::Trail;
use std::fmt;

/// Index of a body inside its owning system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// 8-bit sRGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BodyColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BodyColor {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for BodyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub name: String,
    /// Metres, world frame
    pub position: Vector,
    /// Metres per second
    pub velocity: Vector,
    /// Metres
    pub radius: Scalar,
    /// Kilograms
    pub mass: Scalar,
    pub color: BodyColor,
    /// Fixed bodies never accumulate force or move; only the star is fixed
    pub is_fixed: bool,
    pub primary: Option<BodyId>,
    /// Separation from the primary at bootstrap time, metres. Display only.
    pub orbit_radius: Scalar,
    pub trail: Trail,
}

impl Body {
    pub fn new(name: impl Into<String>, position: Vector, radius: Scalar, mass: Scalar) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: Vector::ZERO,
            radius,
            mass,
            color: BodyColor::WHITE,
            is_fixed: false,
            primary: None,
            orbit_radius: 0.0,
            trail: Trail::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_primary(mut self, primary: BodyId) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_trail(mut self, trail: Trail) -> Self {
        self.trail = trail;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    pub fn distance_to(&self, other: &Body) -> Scalar {
        self.position.distance(other.position)
    }
}
