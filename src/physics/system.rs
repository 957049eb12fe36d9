use crate::physics::body::{Body, BodyId};
use crate::physics::gravity;
use crate::physics::math::{Scalar, Vector};
use std::collections::HashMap;

/// Owned collection of bodies addressed by [`BodyId`], with a name index.
///
/// Primary references are ids into this arena, so a body never owns the body
/// it orbits.
#[derive(Clone, Debug, Default)]
pub struct StarSystem {
    bodies: Vec<Body>,
    index: HashMap<String, BodyId>,
    star: Option<BodyId>,
}

impl StarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body and returns its id, or `None` if the name is taken.
    ///
    /// A fixed body becomes the system's star; adding a second fixed body is
    /// rejected so the one-star invariant holds.
    pub fn add(&mut self, body: Body) -> Option<BodyId> {
        if self.index.contains_key(&body.name) {
            return None;
        }
        if body.is_fixed && self.star.is_some() {
            return None;
        }

        let id = BodyId(self.bodies.len());
        if body.is_fixed {
            self.star = Some(id);
        }
        self.index.insert(body.name.clone(), id);
        self.bodies.push(body);

        Some(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn star(&self) -> Option<BodyId> {
        self.star
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.index.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Body> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index), body))
    }

    /// The primary of `id` when that primary is itself a moving body.
    ///
    /// Such satellites sample their trails relative to the primary and may be
    /// drawn with an exaggerated orbit.
    pub fn moving_primary_of(&self, id: BodyId) -> Option<BodyId> {
        let primary = self.get(id)?.primary?;
        let primary_body = self.get(primary)?;

        (!primary_body.is_fixed).then_some(primary)
    }

    pub fn kinetic_energy(&self) -> Scalar {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Pairwise gravitational potential energy, each pair counted once
    pub fn potential_energy(&self, g: Scalar) -> Scalar {
        self.bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                self.bodies[i + 1..]
                    .iter()
                    .map(move |b| gravity::potential_energy(a, b, g))
            })
            .sum()
    }

    pub fn total_momentum(&self) -> Vector {
        self.bodies.iter().map(Body::momentum).sum()
    }
}
