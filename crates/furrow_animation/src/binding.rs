//! Mapping from behavior states to clips
//!
//! Behaviors switch on a small state enum. [`ClipBinding`] resolves each
//! state's clip name once, when an agent is spawned, so the per-tick path
//! is an array lookup.

use crate::clip_set::{ClipId, ClipSet};
use crate::error::{AnimationError, Result};
use std::fmt;

/// A behavior state with an associated clip
pub trait AnimationState: Copy + Eq + fmt::Debug + 'static {
    /// Every state, ordered by [`AnimationState::index`]
    const ALL: &'static [Self];

    /// Dense index into [`AnimationState::ALL`]
    fn index(self) -> usize;

    /// Name of the clip played in this state
    fn clip_name(self) -> &'static str;

    /// Whether the clip restarts when it reaches its end
    fn loops(self) -> bool {
        true
    }
}

/// Resolved clip for every state of `S`
#[derive(Clone, Debug)]
pub struct ClipBinding<S: AnimationState> {
    clips: Vec<Option<ClipId>>,
    _marker: std::marker::PhantomData<S>,
}

impl<S: AnimationState> ClipBinding<S> {
    /// Resolve every state against `clips`
    ///
    /// A state listed in `required` without a clip is an error; any other
    /// missing clip is logged and the state keeps whatever clip is playing.
    pub fn new(clips: &ClipSet, required: &[S]) -> Result<Self> {
        let mut resolved = vec![None; S::ALL.len()];

        for &state in S::ALL {
            let name = state.clip_name();
            match clips.find(name) {
                Some(id) => resolved[state.index()] = Some(id),
                None if required.contains(&state) => {
                    return Err(AnimationError::MissingStateClip {
                        state: format!("{state:?}"),
                        clip: name.to_string(),
                    });
                }
                None => log::warn!("State {:?} has no clip '{}'", state, name),
            }
        }

        Ok(Self {
            clips: resolved,
            _marker: std::marker::PhantomData,
        })
    }

    /// Clip for a state, if one was found
    #[inline]
    pub fn clip(&self, state: S) -> Option<ClipId> {
        self.clips.get(state.index()).copied().flatten()
    }

    /// Whether every state has a clip
    pub fn is_complete(&self) -> bool {
        self.clips.iter().all(Option::is_some)
    }
}
