//! 4x4 transformation matrix
//!
//! Column-major storage, column vectors: `M * v`, and `A * B` applies `B`
//! first. A bone's skinning matrix therefore reads
//! `global_inverse * global * offset`.

use crate::quaternion::Quat;
use crate::vector::{Vec3, Vec4};
use core::ops::{Mul, MulAssign};

/// 4x4 matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    pub const ZERO: Self = Self {
        cols: [Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO],
    };

    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    /// Build from a row-major array, `rows[r][c]`
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let col = |c: usize| Vec4::new(rows[0][c], rows[1][c], rows[2][c], rows[3][c]);
        Self::from_cols(col(0), col(1), col(2), col(3))
    }

    /// Row-major copy, `rows[r][c]`
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        let t = self.transpose();
        [
            t.cols[0].to_array(),
            t.cols[1].to_array(),
            t.cols[2].to_array(),
            t.cols[3].to_array(),
        ]
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, translation.extend(1.0))
    }

    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::W,
        )
    }

    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, cos, sin, 0.0),
            Vec4::new(0.0, -sin, cos, 0.0),
            Vec4::W,
        )
    }

    /// Rotation about +Y. A positive angle turns +Z toward +X.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(cos, 0.0, -sin, 0.0),
            Vec4::Y,
            Vec4::new(sin, 0.0, cos, 0.0),
            Vec4::W,
        )
    }

    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(cos, sin, 0.0, 0.0),
            Vec4::new(-sin, cos, 0.0, 0.0),
            Vec4::Z,
            Vec4::W,
        )
    }

    /// Rotation matrix from a unit quaternion
    pub fn from_quat(q: Quat) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;

        let xx = q.x * x2;
        let xy = q.x * y2;
        let xz = q.x * z2;
        let yy = q.y * y2;
        let yz = q.y * z2;
        let zz = q.z * z2;
        let wx = q.w * x2;
        let wy = q.w * y2;
        let wz = q.w * z2;

        Self::from_cols(
            Vec4::new(1.0 - (yy + zz), xy + wz, xz - wy, 0.0),
            Vec4::new(xy - wz, 1.0 - (xx + zz), yz + wx, 0.0),
            Vec4::new(xz + wy, yz - wx, 1.0 - (xx + yy), 0.0),
            Vec4::W,
        )
    }

    /// `Translate(translation) * Rotate(rotation) * Scale(scale)`
    pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        let r = Self::from_quat(rotation);
        Self::from_cols(
            r.cols[0] * scale.x,
            r.cols[1] * scale.y,
            r.cols[2] * scale.z,
            translation.extend(1.0),
        )
    }

    /// Local-to-world matrix from an orthonormal basis and a position
    pub fn from_basis(right: Vec3, up: Vec3, forward: Vec3, translation: Vec3) -> Self {
        Self::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            forward.extend(0.0),
            translation.extend(1.0),
        )
    }

    /// Left-handed look-at view matrix (+Z points into the screen)
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize_or_zero();
        let right = up.cross(forward).normalize_or_zero();
        let up = forward.cross(right);

        Self::from_cols(
            Vec4::new(right.x, up.x, forward.x, 0.0),
            Vec4::new(right.y, up.y, forward.y, 0.0),
            Vec4::new(right.z, up.z, forward.z, 0.0),
            Vec4::new(-right.dot(eye), -up.dot(eye), -forward.dot(eye), 1.0),
        )
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let c = &self.cols;
        Self::from_cols(
            Vec4::new(c[0].x, c[1].x, c[2].x, c[3].x),
            Vec4::new(c[0].y, c[1].y, c[2].y, c[3].y),
            Vec4::new(c[0].z, c[1].z, c[2].z, c[3].z),
            Vec4::new(c[0].w, c[1].w, c[2].w, c[3].w),
        )
    }

    /// Translation component
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }

    /// Transform a point (w = 1). Assumes an affine matrix.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        (*self * point.extend(1.0)).truncate()
    }

    /// Transform a direction (w = 0)
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        (*self * vector.extend(0.0)).truncate()
    }

    /// Column-major flat array, ready for upload by a renderer
    pub fn to_cols_array(&self) -> [f32; 16] {
        let c = &self.cols;
        [
            c[0].x, c[0].y, c[0].z, c[0].w,
            c[1].x, c[1].y, c[1].z, c[1].w,
            c[2].x, c[2].y, c[2].z, c[2].w,
            c[3].x, c[3].y, c[3].z, c[3].w,
        ]
    }

    /// Element-wise comparison within `epsilon`
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.to_cols_array()
            .iter()
            .zip(other.to_cols_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rows_round_trip_keeps_translation_in_last_column() {
        let rows = [
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let m = Mat4::from_rows(rows);
        assert_eq!(m.translation(), Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(m.to_rows(), rows);
    }

    #[test]
    fn test_rotation_y_turns_z_toward_x() {
        let m = Mat4::from_rotation_y(FRAC_PI_2);
        let v = m.transform_vector(Vec3::Z);
        assert!(v.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_trs_order() {
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(10.0, 0.0, 0.0),
        );
        // scale first, then rotate, then translate
        let p = m.transform_point(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::new(12.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_basis_matrix_maps_local_forward() {
        let right = Vec3::NEG_Z;
        let forward = Vec3::X;
        let m = Mat4::from_basis(right, Vec3::Y, forward, Vec3::new(1.0, 2.0, 3.0));
        let p = m.transform_point(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::new(2.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn test_look_at_puts_target_on_positive_z() {
        let view = Mat4::look_at_lh(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y);
        let p = view.transform_point(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5));
    }
}
