//! Keyframed animation clips

use furrow_math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// One keyframe: a transform triple per bone, in skeleton bone order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub positions: Vec<Vec3>,
    pub rotations: Vec<Quat>,
    pub scales: Vec<Vec3>,
}

impl AnimationFrame {
    pub fn new(positions: Vec<Vec3>, rotations: Vec<Quat>, scales: Vec<Vec3>) -> Self {
        Self {
            positions,
            rotations,
            scales,
        }
    }

    /// Rest pose for `bone_count` bones
    pub fn identity(bone_count: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; bone_count],
            rotations: vec![Quat::IDENTITY; bone_count],
            scales: vec![Vec3::ONE; bone_count],
        }
    }

    /// Number of complete bone keys, or `None` if the three tracks disagree
    pub fn bone_count(&self) -> Option<usize> {
        let n = self.positions.len();
        (self.rotations.len() == n && self.scales.len() == n).then_some(n)
    }

    /// Longest track length, for error reporting
    pub(crate) fn key_count(&self) -> usize {
        self.positions.len().max(self.rotations.len()).max(self.scales.len())
    }
}

/// Position of a sample between two keyframes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCursor {
    pub frame: usize,
    pub next: usize,
    /// Blend factor in `[0, 1)`
    pub t: f32,
}

/// A named animation clip
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSequence {
    pub name: String,
    /// Playback rate; one tick advances one keyframe
    pub ticks_per_second: f32,
    pub frames: Vec<AnimationFrame>,
}

impl AnimationSequence {
    pub fn new(name: impl Into<String>, ticks_per_second: f32, frames: Vec<AnimationFrame>) -> Self {
        Self {
            name: name.into(),
            ticks_per_second,
            frames,
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Time of the last keyframe, in ticks
    #[inline]
    pub fn last_frame_time(&self) -> f32 {
        self.frames.len().saturating_sub(1) as f32
    }

    /// Clip length in seconds
    #[inline]
    pub fn duration_seconds(&self) -> f32 {
        self.last_frame_time() / self.ticks_per_second
    }

    /// Bracketing keyframes for a time in ticks
    ///
    /// Times past the last keyframe clamp to it. `None` for a clip with no
    /// frames.
    pub fn locate(&self, time: f32) -> Option<FrameCursor> {
        let last = self.frames.len().checked_sub(1)?;
        let time = time.max(0.0);
        let frame = time.floor() as usize;

        if frame >= last {
            return Some(FrameCursor {
                frame: last,
                next: last,
                t: 0.0,
            });
        }

        Some(FrameCursor {
            frame,
            next: (frame + 1).min(last),
            t: time - frame as f32,
        })
    }

    /// Interpolated local transform of one bone at a cursor
    pub fn sample_bone(&self, cursor: FrameCursor, bone: usize) -> (Vec3, Quat, Vec3) {
        let a = &self.frames[cursor.frame];
        let b = &self.frames[cursor.next];
        let t = cursor.t;
        (
            a.positions[bone].lerp(b.positions[bone], t),
            a.rotations[bone].slerp(b.rotations[bone], t),
            a.scales[bone].lerp(b.scales[bone], t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn clip(frames: usize) -> AnimationSequence {
        AnimationSequence::new("test", 10.0, vec![AnimationFrame::identity(1); frames])
    }

    #[test]
    fn test_locate_interpolates_between_frames() {
        let cursor = clip(4).locate(1.25).unwrap();
        assert_eq!((cursor.frame, cursor.next), (1, 2));
        assert_relative_eq!(cursor.t, 0.25);
    }

    #[test]
    fn test_locate_clamps_to_last_frame() {
        let cursor = clip(4).locate(17.5).unwrap();
        assert_eq!((cursor.frame, cursor.next), (3, 3));
        assert_eq!(cursor.t, 0.0);
    }

    #[test]
    fn test_single_and_empty_clips() {
        let cursor = clip(1).locate(0.7).unwrap();
        assert_eq!((cursor.frame, cursor.next, cursor.t), (0, 0, 0.0));
        assert!(clip(0).locate(0.0).is_none());
        assert_eq!(clip(0).last_frame_time(), 0.0);
    }

    #[test]
    fn test_sample_bone_lerps_position() {
        let mut a = AnimationFrame::identity(1);
        let mut b = AnimationFrame::identity(1);
        a.positions[0] = Vec3::new(0.0, 0.0, 0.0);
        b.positions[0] = Vec3::new(10.0, 0.0, 0.0);
        let seq = AnimationSequence::new("slide", 30.0, vec![a, b]);

        let cursor = seq.locate(0.5).unwrap();
        let (pos, rot, scale) = seq.sample_bone(cursor, 0);
        assert_relative_eq!(pos.x, 5.0);
        assert_eq!(rot, Quat::IDENTITY);
        assert_eq!(scale, Vec3::ONE);
        assert_relative_eq!(seq.duration_seconds(), 1.0 / 30.0);
    }
}
