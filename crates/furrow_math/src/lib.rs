//! # furrow_math - Math Primitives
//!
//! Vectors, matrices, quaternions and bounding boxes for the Furrow
//! simulation core.
//!
//! Conventions: Y is up, the ground is the XZ plane and the world is
//! left-handed, so `right = up.cross(forward)`. Matrices are column-major and
//! multiply column vectors.

pub mod bounds;
pub mod matrix;
pub mod quaternion;
pub mod ray;
pub mod vector;

pub use bounds::*;
pub use matrix::*;
pub use quaternion::*;
pub use ray::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub mod prelude {
    pub use crate::bounds::{Penetration, AABB};
    pub use crate::matrix::Mat4;
    pub use crate::quaternion::Quat;
    pub use crate::ray::{ray_aabb, Ray};
    pub use crate::vector::{Vec3, Vec4};
    pub use crate::{degrees, lerp, radians};
}
