//! 3D ray for picking and line-of-sight tests

use crate::bounds::AABB;
use crate::vector::Vec3;

/// Ray with an origin and a direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `start` toward `end`
    #[inline]
    pub fn from_points(start: Vec3, end: Vec3) -> Self {
        Self::new(start, end - start)
    }

    /// Point at distance `t`
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Ray-AABB slab test
///
/// Returns the distance to the entry point, `0.0` when the ray starts inside.
#[inline]
pub fn ray_aabb(ray: &Ray, aabb: &AABB) -> Option<f32> {
    aabb.ray_intersect(ray.origin, ray.direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_aabb_round_trip() {
        let aabb = AABB::new(Vec3::new(10.0, -1.0, -1.0), Vec3::new(12.0, 1.0, 1.0));
        let ray = Ray::from_points(Vec3::new(0.0, 0.5, 0.0), Vec3::new(20.0, 0.5, 0.0));

        let t = ray_aabb(&ray, &aabb).unwrap();
        assert_relative_eq!(t, 10.0, epsilon = 1e-5);
        assert_relative_eq!(ray.at(t).x, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let aabb = AABB::new(Vec3::new(10.0, -1.0, -1.0), Vec3::new(12.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_X);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }
}
