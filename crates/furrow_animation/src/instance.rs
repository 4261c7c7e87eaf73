//! Per-entity animation playback
//!
//! An [`AnimationInstance`] owns the playback clock and the bone matrix
//! buffer for one entity. It never loops on its own: callers poll
//! [`AnimationInstance::is_finished`] and call [`AnimationInstance::reset`].

use crate::clip_set::{ClipId, ClipSet};
use crate::error::{AnimationError, Result};
use furrow_math::Mat4;
use std::sync::Arc;

/// Playback state of one animated entity
#[derive(Clone, Debug)]
pub struct AnimationInstance {
    clips: Arc<ClipSet>,
    current: ClipId,
    /// Playback position in ticks
    current_time: f32,
    /// Set by `restart`; the next update holds the first frame
    cut_pending: bool,
    globals: Vec<Mat4>,
    bone_matrices: Vec<Mat4>,
}

impl AnimationInstance {
    /// Start playing `clip` from its first frame
    pub fn new(clips: Arc<ClipSet>, clip: ClipId) -> Self {
        let bone_count = clips.skeleton().bone_count();
        let mut instance = Self {
            clips,
            current: clip,
            current_time: 0.0,
            cut_pending: false,
            globals: vec![Mat4::IDENTITY; bone_count],
            bone_matrices: vec![Mat4::IDENTITY; bone_count],
        };
        instance.recompute();
        instance
    }

    /// Start playing the clip with this name
    pub fn with_clip_name(clips: Arc<ClipSet>, name: &str) -> Result<Self> {
        let clip = clips.resolve(name)?;
        Ok(Self::new(clips, clip))
    }

    /// Advance playback by `dt` seconds on `clip`
    ///
    /// Switching clips is an instantaneous cut to the new clip's first frame;
    /// time does not advance on the call that switches, nor on the first
    /// call after [`AnimationInstance::restart`].
    ///
    /// A `ClipId` is only meaningful for the set that issued it; one past
    /// the end of this set fails with [`AnimationError::ClipOutOfRange`] and
    /// leaves playback untouched.
    pub fn update(&mut self, clip: ClipId, dt: f32) -> Result<()> {
        let Some(seq) = self.clips.get(clip) else {
            return Err(AnimationError::ClipOutOfRange {
                clip: clip.index(),
                clip_count: self.clips.len(),
            });
        };

        if clip != self.current {
            self.current = clip;
            self.current_time = 0.0;
        } else if !self.cut_pending {
            self.current_time += dt * seq.ticks_per_second;
        }
        self.cut_pending = false;
        self.recompute();
        Ok(())
    }

    /// [`AnimationInstance::update`] with a clip name
    pub fn update_named(&mut self, name: &str, dt: f32) -> Result<()> {
        let clip = self.clips.resolve(name)?;
        self.update(clip, dt)
    }

    /// Whether playback has reached the last keyframe
    pub fn is_finished(&self) -> bool {
        self.clips
            .get(self.current)
            .map_or(true, |seq| self.current_time >= seq.last_frame_time())
    }

    /// Rewind the current clip to its first frame
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.recompute();
    }

    /// Cut to `clip`'s first frame, even if it is already current
    ///
    /// Like a clip switch, the next [`AnimationInstance::update`] shows the
    /// first frame without advancing.
    pub fn restart(&mut self, clip: ClipId) {
        if self.clips.get(clip).is_some() {
            self.current = clip;
        }
        self.cut_pending = true;
        self.reset();
    }

    /// Skinning matrices in skeleton bone order
    #[inline]
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.bone_matrices
    }

    #[inline]
    pub fn current_clip(&self) -> ClipId {
        self.current
    }

    pub fn current_clip_name(&self) -> &str {
        self.clips
            .get(self.current)
            .map_or("", |seq| seq.name.as_str())
    }

    /// Playback position in ticks
    #[inline]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Length of the current clip in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.clips
            .get(self.current)
            .map_or(0.0, |seq| seq.duration_seconds())
    }

    #[inline]
    pub fn clip_set(&self) -> &Arc<ClipSet> {
        &self.clips
    }

    fn recompute(&mut self) {
        let Self {
            clips,
            current,
            current_time,
            globals,
            bone_matrices,
            ..
        } = self;

        let skeleton = clips.skeleton();
        let global_inverse = *skeleton.global_inverse();
        let sequence = clips.get(*current);
        let cursor = sequence.and_then(|seq| seq.locate(*current_time));

        for (i, bone) in skeleton.bones().iter().enumerate() {
            let local = match (sequence, cursor) {
                (Some(seq), Some(cursor)) => {
                    let (position, rotation, scale) = seq.sample_bone(cursor, i);
                    Mat4::from_scale_rotation_translation(scale, rotation, position)
                }
                _ => Mat4::IDENTITY,
            };

            let global = match bone.parent {
                Some(parent) => globals[parent] * local,
                None => local,
            };

            globals[i] = global;
            bone_matrices[i] = global_inverse * global * bone.offset;
        }
    }
}
