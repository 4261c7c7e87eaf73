//! Quaternion for bone rotations

use crate::vector::Vec3;
use core::ops::Mul;

/// Unit quaternion representing a 3D rotation
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from axis and angle (radians)
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        let axis = axis.normalize();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(sin, 0.0, 0.0, cos)
    }

    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(0.0, sin, 0.0, cos)
    }

    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(0.0, 0.0, sin, cos)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalize; a zero quaternion becomes the identity
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Spherical interpolation along the shortest arc
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let mut dot = self.dot(other);
        let mut other = other;

        if dot < 0.0 {
            other = Self::new(-other.x, -other.y, -other.z, -other.w);
            dot = -dot;
        }

        let dot = dot.clamp(-1.0, 1.0);

        // Nearly parallel: nlerp
        if dot > 0.9995 {
            return Self::new(
                self.x + (other.x - self.x) * t,
                self.y + (other.y - self.y) * t,
                self.z + (other.z - self.z) * t,
                self.w + (other.w - self.w) * t,
            )
            .normalize();
        }

        let theta = dot.acos();
        let sin_theta = theta.sin();
        let s1 = ((1.0 - t) * theta).sin() / sin_theta;
        let s2 = (t * theta).sin() / sin_theta;

        Self::new(
            self.x * s1 + other.x * s2,
            self.y * s1 + other.y * s2,
            self.z * s1 + other.z * s2,
            self.w * s1 + other.w * s2,
        )
    }

    /// Rotate a vector
    pub fn mul_vec3(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Compare within `epsilon`, treating `q` and `-q` as the same rotation
    pub fn abs_diff_eq(self, other: Self, epsilon: f32) -> bool {
        let close = |a: Self, b: Self| {
            (a.x - b.x).abs() <= epsilon
                && (a.y - b.y).abs() <= epsilon
                && (a.z - b.z).abs() <= epsilon
                && (a.w - b.w).abs() <= epsilon
        };
        close(self, other) || close(self, Self::new(-other.x, -other.y, -other.z, -other.w))
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product; `a * b` applies `b` first
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec3(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Mat4;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(FRAC_PI_2);
        assert!(a.slerp(b, 0.0).abs_diff_eq(a, 1e-6));
        assert!(a.slerp(b, 1.0).abs_diff_eq(b, 1e-6));
        assert!(a.slerp(b, 0.5).abs_diff_eq(Quat::from_rotation_y(FRAC_PI_2 * 0.5), 1e-5));
    }

    #[test]
    fn test_slerp_takes_shortest_path() {
        let a = Quat::from_rotation_y(0.1);
        let b = Quat::from_rotation_y(0.3);
        let neg_b = Quat::new(-b.x, -b.y, -b.z, -b.w);
        let mid = a.slerp(neg_b, 0.5);
        assert!(mid.abs_diff_eq(Quat::from_rotation_y(0.2), 1e-5));
    }

    #[test]
    fn test_rotation_matches_matrix() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), PI / 3.0);
        let v = Vec3::new(0.3, -2.0, 5.0);
        let by_quat = q * v;
        let by_mat = Mat4::from_quat(q).transform_vector(v);
        assert!(by_quat.abs_diff_eq(by_mat, 1e-5));
    }
}
