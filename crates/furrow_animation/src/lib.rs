//! # furrow_animation - Skeletal Animation
//!
//! Keyframe sampling and bone hierarchy evaluation for skinned agents.
//!
//! # Architecture
//!
//! ```text
//! Skeleton ──┐
//!            ├── ClipSet (Arc, shared per model) ── AnimationInstance (per agent)
//! clips ─────┘                                          │
//!                                                       ▼
//!                                               bone matrices → renderer
//! ```
//!
//! # Example
//!
//! ```ignore
//! use furrow_animation::prelude::*;
//!
//! let clips = Arc::new(ClipSet::new(skeleton, sequences)?);
//! let mut anim = AnimationInstance::with_clip_name(clips, "idle")?;
//!
//! anim.update_named("walk", dt)?;
//! if anim.is_finished() {
//!     anim.reset();
//! }
//! renderer.upload(anim.bone_matrices());
//! ```

pub mod binding;
pub mod clip_set;
pub mod error;
pub mod instance;
pub mod sequence;
pub mod skeleton;

pub mod prelude {
    //! Common imports for animation playback
    pub use crate::binding::{AnimationState, ClipBinding};
    pub use crate::clip_set::{ClipId, ClipSet};
    pub use crate::error::{AnimationError, Result};
    pub use crate::instance::AnimationInstance;
    pub use crate::sequence::{AnimationFrame, AnimationSequence, FrameCursor};
    pub use crate::skeleton::{Bone, Skeleton};
}

pub use prelude::*;
