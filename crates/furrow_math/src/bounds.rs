//! Axis-aligned bounding boxes for collision queries

use crate::matrix::Mat4;
use crate::vector::Vec3;

/// Axis-Aligned Bounding Box
///
/// An empty box has `min = +inf` and `max = -inf`, so the first
/// [`AABB::expand`] establishes `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

/// Minimum translation needed to separate two overlapping boxes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Penetration {
    /// Overlap along the separating axis, always positive
    pub depth: f32,
    /// Unit axis pushing the first box out of the second
    pub normal: Vec3,
}

impl AABB {
    /// Empty (inverted) box
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing every point
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut aabb = Self::EMPTY;
        for &point in points {
            aabb.expand(point);
        }
        aabb
    }

    /// Return to the empty state
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Grow to include a point
    #[inline]
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to include another box
    #[inline]
    pub fn expand_aabb(&mut self, other: &AABB) {
        self.expand(other.min);
        self.expand(other.max);
    }

    /// Shift both corners
    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.min += delta;
        self.max += delta;
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Inverted on any axis
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Closed-interval overlap test; touching faces count
    #[inline]
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// The 8 corners
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Axis-aligned envelope of the 8 transformed corners
    ///
    /// Conservative under rotation: the result may be larger than the
    /// rotated box, never smaller.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        let mut result = Self::EMPTY;
        for corner in self.corners() {
            result.expand(matrix.transform_point(corner));
        }
        result
    }

    /// Penetration of `self` into `other`
    ///
    /// Picks the axis with the smallest positive overlap, testing X, Y then Z;
    /// on equal overlaps the later axis wins. `None` unless all three axes
    /// overlap by a positive amount.
    pub fn intersect_depth(&self, other: &AABB) -> Option<Penetration> {
        let delta = (self.center() - other.center()).to_array();
        let half_a = self.half_extents().to_array();
        let half_b = other.half_extents().to_array();

        let mut best: Option<(usize, f32)> = None;
        for axis in 0..3 {
            let overlap = half_a[axis] + half_b[axis] - delta[axis].abs();
            if overlap <= 0.0 {
                return None;
            }
            match best {
                Some((_, depth)) if overlap > depth => {}
                _ => best = Some((axis, overlap)),
            }
        }

        let (axis, depth) = best?;
        let sign = if delta[axis] < 0.0 { -1.0 } else { 1.0 };
        let mut normal = [0.0; 3];
        normal[axis] = sign;

        Some(Penetration {
            depth,
            normal: Vec3::from_array(normal),
        })
    }

    /// Slab test for a ray starting at `origin`
    ///
    /// Returns the entry distance in units of `direction`, or `0.0` when the
    /// origin is inside. A direction component below `1e-6` in magnitude
    /// requires the origin to lie within that slab.
    pub fn ray_intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let o = origin.to_array();
        let d = direction.to_array();
        let min = self.min.to_array();
        let max = self.max.to_array();

        let mut t_min = 0.0f32;
        let mut t_max = f32::MAX;

        for axis in 0..3 {
            if d[axis].abs() < 1e-6 {
                if o[axis] < min[axis] || o[axis] > max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d[axis];
            let mut t1 = (min[axis] - o[axis]) * inv;
            let mut t2 = (max[axis] - o[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn unit_box() -> AABB {
        AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_expand_keeps_min_below_max() {
        let mut aabb = AABB::EMPTY;
        assert!(aabb.is_empty());

        let points = [
            Vec3::new(3.0, -2.0, 5.0),
            Vec3::new(-4.0, 7.0, 0.5),
            Vec3::new(0.0, 0.0, -9.0),
        ];
        for p in points {
            aabb.expand(p);
            assert!(aabb.min.x <= aabb.max.x);
            assert!(aabb.min.y <= aabb.max.y);
            assert!(aabb.min.z <= aabb.max.z);
            assert!(aabb.contains_point(p));
        }
        assert_eq!(aabb.min, Vec3::new(-4.0, -2.0, -9.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 7.0, 5.0));

        aabb.reset();
        assert!(aabb.is_empty());
    }

    #[test]
    fn test_expand_aabb_and_translate() {
        let mut a = unit_box();
        a.expand_aabb(&AABB::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.5, 0.5)));
        assert_eq!(a.max, Vec3::new(3.0, 1.0, 1.0));

        a.translate(Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(a.min, Vec3::new(-1.0, 9.0, -1.0));
        assert_relative_eq!(a.volume(), 4.0 * 2.0 * 2.0);
    }

    #[test]
    fn test_transform_envelope_contains_corners() {
        let local = AABB::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(3.0, 1.0, 2.0));
        for angle in [FRAC_PI_4, FRAC_PI_2, 1.0] {
            let m = Mat4::from_translation(Vec3::new(5.0, 0.0, -3.0))
                * Mat4::from_rotation_y(angle);
            let world = local.transform(&m);
            for corner in local.corners() {
                let p = m.transform_point(corner);
                let grown = AABB::new(world.min - Vec3::splat(1e-4), world.max + Vec3::splat(1e-4));
                assert!(grown.contains_point(p));
            }
        }
    }

    #[test]
    fn test_transform_quarter_turn_swaps_extents() {
        let local = AABB::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 1.0, 2.0));
        let world = local.transform(&Mat4::from_rotation_y(FRAC_PI_2));
        assert_relative_eq!(world.size().x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(world.size().z, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_45_degrees_is_conservative() {
        let world = unit_box().transform(&Mat4::from_rotation_y(FRAC_PI_4));
        let expected = 2.0f32.sqrt();
        assert_relative_eq!(world.max.x, expected, epsilon = 1e-5);
        assert_relative_eq!(world.max.z, expected, epsilon = 1e-5);
        assert_relative_eq!(world.max.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_intersects_is_symmetric_and_closed() {
        let a = unit_box();
        let touching = AABB::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = AABB::new(Vec3::new(1.5, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
        assert!(!apart.intersects(&a));
    }

    #[test]
    fn test_intersect_depth_sign_and_depth() {
        let a = AABB::from_center_half_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);
        let b = unit_box();

        let hit = a.intersect_depth(&b).unwrap();
        assert_relative_eq!(hit.depth, 0.5, epsilon = 1e-6);
        assert_eq!(hit.normal, Vec3::X);

        let hit = b.intersect_depth(&a).unwrap();
        assert_relative_eq!(hit.depth, 0.5, epsilon = 1e-6);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn test_intersect_depth_none_without_positive_overlap() {
        let a = unit_box();
        let touching = AABB::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersect_depth(&touching).is_none());

        let apart = AABB::from_center_half_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        assert!(a.intersect_depth(&apart).is_none());
    }

    #[test]
    fn test_intersect_depth_ties_pick_later_axis() {
        // identical boxes overlap equally on every axis
        let hit = unit_box().intersect_depth(&unit_box()).unwrap();
        assert_relative_eq!(hit.depth, 2.0);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_ray_hit_lands_on_surface() {
        let b = unit_box();
        let origin = Vec3::new(-5.0, 0.25, 0.5);
        let dir = Vec3::new(1.0, 0.0, 0.0);

        let t = b.ray_intersect(origin, dir).unwrap();
        assert_relative_eq!(t, 4.0, epsilon = 1e-6);
        let p = origin + dir * t;
        assert_relative_eq!(p.x, b.min.x, epsilon = 1e-6);
        assert!(b.contains_point(p));
    }

    #[test]
    fn test_ray_parallel_outside_slab_misses() {
        let b = unit_box();
        assert!(b.ray_intersect(Vec3::new(-5.0, 2.0, 0.0), Vec3::X).is_none());
        assert!(b.ray_intersect(Vec3::new(-5.0, 0.0, 0.0), Vec3::NEG_X).is_none());
    }

    #[test]
    fn test_ray_from_inside_returns_zero() {
        let t = unit_box().ray_intersect(Vec3::ZERO, Vec3::new(0.3, 0.4, 0.5)).unwrap();
        assert_eq!(t, 0.0);
    }
}
