//! Load-time binding of a skeleton to its clips

use crate::error::{AnimationError, Result};
use crate::sequence::AnimationSequence;
use crate::skeleton::Skeleton;
use std::collections::HashMap;
use std::sync::Arc;

/// Index of a clip within its [`ClipSet`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(u32);

impl ClipId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A skeleton together with every clip authored for it
///
/// Name lookups happen here once; playback works with [`ClipId`]s.
#[derive(Debug)]
pub struct ClipSet {
    skeleton: Arc<Skeleton>,
    clips: Vec<AnimationSequence>,
    by_name: HashMap<String, ClipId>,
}

impl ClipSet {
    /// Validate the clips against the skeleton and index them by name
    pub fn new(skeleton: Arc<Skeleton>, clips: Vec<AnimationSequence>) -> Result<Self> {
        if clips.is_empty() {
            return Err(AnimationError::EmptyClipSet);
        }

        let expected = skeleton.bone_count();
        let mut by_name = HashMap::with_capacity(clips.len());

        for (index, clip) in clips.iter().enumerate() {
            if !(clip.ticks_per_second.is_finite() && clip.ticks_per_second > 0.0) {
                return Err(AnimationError::InvalidTicksPerSecond {
                    clip: clip.name.clone(),
                    ticks_per_second: clip.ticks_per_second,
                });
            }

            for (frame_index, frame) in clip.frames.iter().enumerate() {
                if frame.bone_count() != Some(expected) {
                    return Err(AnimationError::BoneCountMismatch {
                        clip: clip.name.clone(),
                        frame: frame_index,
                        expected,
                        found: frame.key_count(),
                    });
                }
            }

            if by_name.contains_key(&clip.name) {
                log::warn!("Duplicate clip name '{}', keeping the first", clip.name);
                continue;
            }
            by_name.insert(clip.name.clone(), ClipId(index as u32));
        }

        log::debug!(
            "Clip set ready: {} clips for {} bones",
            clips.len(),
            expected
        );

        Ok(Self {
            skeleton,
            clips,
            by_name,
        })
    }

    #[inline]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    /// Clip id for a name
    #[inline]
    pub fn find(&self, name: &str) -> Option<ClipId> {
        self.by_name.get(name).copied()
    }

    /// Clip id for a name, failing on a miss
    pub fn resolve(&self, name: &str) -> Result<ClipId> {
        self.find(name)
            .ok_or_else(|| AnimationError::UnknownClip(name.to_string()))
    }

    #[inline]
    pub fn get(&self, id: ClipId) -> Option<&AnimationSequence> {
        self.clips.get(id.index())
    }

    /// The first clip, used as a default
    #[inline]
    pub fn first(&self) -> ClipId {
        ClipId(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipId, &AnimationSequence)> {
        self.clips
            .iter()
            .enumerate()
            .map(|(i, clip)| (ClipId(i as u32), clip))
    }
}
