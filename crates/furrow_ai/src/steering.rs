//! Rate-limited turning on the ground plane

use furrow_math::{Mat4, Vec3};

/// Signed angle from `from` to `to` about +Y, in `[-PI, PI]`
///
/// Positive turns +Z toward +X, matching [`Mat4::from_rotation_y`].
pub fn signed_angle_y(from: Vec3, to: Vec3) -> f32 {
    let f = from.normalize();
    let t = to.normalize();

    let angle = f.dot(t).clamp(-1.0, 1.0).acos();
    if f.cross(t).y < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Clamp a turn to what `turn_speed` allows in `dt`
#[inline]
pub fn clamp_turn(angle: f32, turn_speed: f32, dt: f32) -> f32 {
    let max_turn = turn_speed * dt;
    angle.clamp(-max_turn, max_turn)
}

/// Rotate a vector about +Y
#[inline]
pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    Mat4::from_rotation_y(angle).transform_vector(v)
}

/// One rate-limited turn step toward `desired`
///
/// Returns the new forward and the turn actually applied. A zero desired
/// direction leaves `forward` unchanged.
pub fn turn_towards(forward: Vec3, desired: Vec3, turn_speed: f32, dt: f32) -> (Vec3, f32) {
    let Some(desired) = desired.flatten().try_normalize() else {
        return (forward, 0.0);
    };

    let angle = clamp_turn(signed_angle_y(forward, desired), turn_speed, dt);
    (rotate_y(forward, angle).normalize(), angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_signed_angle_sign() {
        assert_relative_eq!(signed_angle_y(Vec3::Z, Vec3::X), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(signed_angle_y(Vec3::Z, Vec3::NEG_X), -FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(signed_angle_y(Vec3::Z, Vec3::Z), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_turn_rate_is_clamped() {
        // 5 rad/s for 0.1 s allows at most 0.5 rad of a half-turn
        let angle = clamp_turn(PI, 5.0, 0.1);
        assert!(angle.abs() <= 0.5 + 1e-6);

        let (forward, applied) = turn_towards(Vec3::Z, Vec3::NEG_Z + Vec3::new(1e-3, 0.0, 0.0), 5.0, 0.1);
        assert_relative_eq!(applied, 0.5, epsilon = 1e-6);
        assert_relative_eq!(signed_angle_y(Vec3::Z, forward), 0.5, epsilon = 1e-5);
        assert_relative_eq!(forward.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_small_turn_completes() {
        let desired = rotate_y(Vec3::Z, 0.1);
        let (forward, applied) = turn_towards(Vec3::Z, desired, 5.0, 0.1);
        assert_relative_eq!(applied, 0.1, epsilon = 1e-5);
        assert!(forward.abs_diff_eq(desired, 1e-5));
    }

    #[test]
    fn test_zero_direction_keeps_forward() {
        let (forward, applied) = turn_towards(Vec3::X, Vec3::new(0.0, 3.0, 0.0), 5.0, 0.1);
        assert_eq!(forward, Vec3::X);
        assert_eq!(applied, 0.0);
    }
}
