//! Static obstacles

use furrow_math::{Mat4, Penetration, AABB};

/// Anything an agent can bump into
pub trait Obstacle {
    /// Name for logging
    fn name(&self) -> &str;

    /// Whether the box touches this obstacle
    fn collide(&self, aabb: &AABB) -> bool;

    /// Penetration of the box into this obstacle, if any
    fn penetration(&self, _aabb: &AABB) -> Option<Penetration> {
        None
    }
}

/// One model placed many times, such as fence posts or crops
///
/// World boxes are computed once from the placements; obstacles never move.
#[derive(Clone, Debug)]
pub struct InstancedObstacle {
    name: String,
    local_aabb: AABB,
    instances: Vec<Mat4>,
    world_aabbs: Vec<AABB>,
}

impl InstancedObstacle {
    pub fn new(name: impl Into<String>, local_aabb: AABB, instances: Vec<Mat4>) -> Self {
        let world_aabbs = instances.iter().map(|m| local_aabb.transform(m)).collect();
        let name = name.into();
        log::debug!("Obstacle '{}' placed {} times", name, instances.len());
        Self {
            name,
            local_aabb,
            instances,
            world_aabbs,
        }
    }

    #[inline]
    pub fn local_aabb(&self) -> &AABB {
        &self.local_aabb
    }

    /// Instance matrices, for the renderer
    #[inline]
    pub fn instances(&self) -> &[Mat4] {
        &self.instances
    }

    #[inline]
    pub fn world_aabbs(&self) -> &[AABB] {
        &self.world_aabbs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Obstacle for InstancedObstacle {
    fn name(&self) -> &str {
        &self.name
    }

    fn collide(&self, aabb: &AABB) -> bool {
        self.world_aabbs.iter().any(|world| world.intersects(aabb))
    }

    fn penetration(&self, aabb: &AABB) -> Option<Penetration> {
        self.world_aabbs
            .iter()
            .find_map(|world| aabb.intersect_depth(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use furrow_math::Vec3;

    #[test]
    fn test_instances_become_world_boxes() {
        let post = AABB::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 50.0, 5.0));
        let fence = InstancedObstacle::new(
            "fence",
            post,
            vec![
                Mat4::from_translation(Vec3::new(100.0, 0.0, 0.0)),
                Mat4::from_translation(Vec3::new(-100.0, 0.0, 0.0)),
            ],
        );

        assert_eq!(fence.len(), 2);
        assert_eq!(fence.world_aabbs()[0].min, Vec3::new(95.0, 0.0, -5.0));

        let touching = AABB::from_center_half_extents(Vec3::new(-100.0, 10.0, 0.0), Vec3::ONE);
        assert!(fence.collide(&touching));
        assert!(!fence.collide(&AABB::from_center_half_extents(Vec3::ZERO, Vec3::ONE)));

        let hit = fence.penetration(&touching).unwrap();
        // x and z tie at 6; the later axis wins
        assert_relative_eq!(hit.depth, 6.0);
        assert_eq!(hit.normal, Vec3::Z);
    }
}
