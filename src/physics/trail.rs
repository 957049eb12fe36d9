use crate::physics::math::Vector;
use std::collections::VecDeque;

/// Default number of samples a trail keeps before evicting the oldest
pub const DEFAULT_MAX_TRAIL_POINTS: usize = 20_000;

/// Bounded history of a body's recent positions, oldest first.
///
/// Samples are either absolute world positions or offsets from the body's
/// primary; the trail itself does not know which, the caller decides when
/// sampling and again when projecting.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Vector>,
    max_points: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRAIL_POINTS)
    }
}

impl Trail {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: VecDeque::new(),
            max_points,
        }
    }

    /// Appends a sample and evicts from the front until the cap holds
    pub fn push(&mut self, point: Vector) {
        self.points.push_back(point);

        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn latest(&self) -> Option<Vector> {
        self.points.back().copied()
    }

    pub fn oldest(&self) -> Option<Vector> {
        self.points.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector> {
        self.points.iter()
    }
}
