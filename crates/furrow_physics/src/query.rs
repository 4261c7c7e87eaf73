//! Collision queries against the static obstacle set
//!
//! Brute force: every query scans every obstacle instance.

use crate::obstacle::Obstacle;
use furrow_math::{Mat4, Penetration, Vec3, AABB};
use std::fmt;

/// Registry of static obstacles, read-only once the scene is running
#[derive(Default)]
pub struct ObstacleSet {
    obstacles: Vec<Box<dyn Obstacle>>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle
    pub fn add(&mut self, obstacle: impl Obstacle + 'static) {
        self.obstacles.push(Box::new(obstacle));
    }

    /// Builder form of [`ObstacleSet::add`]
    pub fn with(mut self, obstacle: impl Obstacle + 'static) -> Self {
        self.add(obstacle);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Obstacle> {
        self.obstacles.iter().map(|o| o.as_ref())
    }

    /// Whether a prospective box overlaps any obstacle
    pub fn query_blocked(&self, aabb: &AABB) -> bool {
        self.obstacles.iter().any(|o| o.collide(aabb))
    }

    /// Penetration into the first obstacle the box overlaps
    pub fn first_penetration(&self, aabb: &AABB) -> Option<Penetration> {
        self.obstacles.iter().find_map(|o| o.penetration(aabb))
    }

    /// Clip a ground-plane move so the box does not enter an obstacle
    ///
    /// `world_at` builds the world matrix the box would have at a given
    /// position. The full move is tried first; if it is blocked the X and Z
    /// components are tried on their own and each blocked axis is dropped.
    pub fn slide_delta(
        &self,
        local: &AABB,
        world_at: impl Fn(Vec3) -> Mat4,
        position: Vec3,
        delta: Vec3,
    ) -> Vec3 {
        let blocked = |step: Vec3| self.query_blocked(&local.transform(&world_at(position + step)));

        if !blocked(delta) {
            return delta;
        }

        let x = Vec3::new(delta.x, 0.0, 0.0);
        let z = Vec3::new(0.0, 0.0, delta.z);
        let slid = Vec3::new(
            if delta.x != 0.0 && !blocked(x) { delta.x } else { 0.0 },
            0.0,
            if delta.z != 0.0 && !blocked(z) { delta.z } else { 0.0 },
        );

        log::trace!("Move {:?} blocked, sliding by {:?}", delta, slid);
        slid
    }
}

impl fmt::Debug for ObstacleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.obstacles.iter().map(|o| o.name())).finish()
    }
}
