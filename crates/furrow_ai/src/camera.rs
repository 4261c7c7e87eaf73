//! Third-person camera rig
//!
//! Orbits a followed position. Yaw and pitch come from cursor motion, which
//! is measured against the rig's own last cursor sample.

use crate::config::CameraTuning;
use furrow_math::{radians, Mat4, Vec3};

const PITCH_LIMIT: f32 = 89.0;

/// Orbiting camera
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Degrees; 0 looks down +Z
    pub yaw: f32,
    /// Degrees; positive looks down at the target
    pub pitch: f32,
    pub distance: f32,
    pub height: f32,
    pub sensitivity: f32,
    last_cursor: Option<[f32; 2]>,
    focus: Vec3,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            yaw: tuning.initial_yaw_degrees,
            pitch: tuning.initial_pitch_degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: tuning.distance,
            height: tuning.height,
            sensitivity: tuning.sensitivity,
            last_cursor: None,
            focus: Vec3::ZERO,
        }
    }

    /// Apply cursor motion since the previous sample
    ///
    /// The first sample only records the position. Moving the cursor right
    /// turns the view right; moving it down tilts the view down.
    pub fn handle_cursor(&mut self, cursor: [f32; 2]) {
        if let Some([last_x, last_y]) = self.last_cursor {
            let dx = cursor[0] - last_x;
            let dy = cursor[1] - last_y;
            if dx != 0.0 || dy != 0.0 {
                self.yaw = (self.yaw + dx * self.sensitivity) % 360.0;
                self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
        }
        self.last_cursor = Some(cursor);
    }

    /// Set the position to orbit
    #[inline]
    pub fn follow(&mut self, position: Vec3) {
        self.focus = position;
    }

    /// View direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = radians(self.yaw).sin_cos();
        let (sin_pitch, cos_pitch) = radians(self.pitch).sin_cos();
        Vec3::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
    }

    /// View direction projected onto the ground
    pub fn forward_flat(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = radians(self.yaw).sin_cos();
        Vec3::new(sin_yaw, 0.0, cos_yaw)
    }

    /// Screen right projected onto the ground
    pub fn right_flat(&self) -> Vec3 {
        Vec3::Y.cross(self.forward_flat())
    }

    /// Point the camera looks at
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.focus + Vec3::new(0.0, self.height, 0.0)
    }

    /// Camera position
    pub fn eye(&self) -> Vec3 {
        self.target() - self.forward() * self.distance
    }

    /// Left-handed view matrix for the renderer
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), self.target(), Vec3::Y)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraTuning::default())
    }
}
