//! Error types for animation content

use thiserror::Error;

/// Animation content errors, reported when a skeleton or clip set is built
#[derive(Debug, Error)]
pub enum AnimationError {
    /// No clip with this name in the clip set
    #[error("Unknown animation clip: {0}")]
    UnknownClip(String),

    /// A bone's parent does not come before it
    #[error("Bone {bone} ('{name}') has parent {parent}, which does not precede it")]
    InvalidParent {
        bone: usize,
        name: String,
        parent: usize,
    },

    /// A frame does not carry one key per skeleton bone
    #[error("Clip '{clip}' frame {frame} has {found} bone keys, skeleton has {expected}")]
    BoneCountMismatch {
        clip: String,
        frame: usize,
        expected: usize,
        found: usize,
    },

    /// Playback rate must be positive
    #[error("Clip '{clip}' has invalid ticks per second: {ticks_per_second}")]
    InvalidTicksPerSecond { clip: String, ticks_per_second: f32 },

    /// A clip set needs at least one clip to start playing
    #[error("Clip set contains no clips")]
    EmptyClipSet,

    /// A clip id that was not issued by this clip set
    #[error("Clip id {clip} is out of range for a set of {clip_count} clips")]
    ClipOutOfRange { clip: usize, clip_count: usize },

    /// A state the behavior cannot run without has no clip
    #[error("No clip '{clip}' for required state {state}")]
    MissingStateClip { state: String, clip: String },
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
