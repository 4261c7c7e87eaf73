//! Behavior interface
//!
//! A behavior reads the world, mutates only its own agent's body and reports
//! what it did as an [`Action`]. Effects on other agents are carried out by
//! the scene from that action before the next agent updates.

use crate::agent::{Agent, AgentId};
use crate::body::AgentBody;
use crate::camera::CameraRig;
use crate::input::InputState;
use furrow_animation::{AnimationState, ClipBinding};
use furrow_core::HandleMap;
use furrow_math::Vec3;
use furrow_physics::ObstacleSet;

/// Outcome of one behavior update
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Standing still
    Idle,
    /// Waiting on the action lock
    Locked,
    Moved { from: Vec3, to: Vec3 },
    /// Movement vetoed by an obstacle
    Blocked,
    /// Turning in place, too far off course to advance
    Turning,
    /// Started an attack that lands on `victims`
    Attack { victims: Vec<AgentId>, damage: f32 },
    /// Reacting to a hit
    HitReact,
    Dead,
    /// Picked up a dead agent
    PickUp(AgentId),
    /// Put a carried agent down
    Drop {
        target: AgentId,
        position: Vec3,
        forward: Vec3,
    },
}

/// Read-only view of everything outside the updating agent
pub struct WorldView<'a> {
    /// Every agent except the one updating
    pub agents: &'a HandleMap<Agent>,
    pub obstacles: &'a ObstacleSet,
    pub input: &'a InputState,
    pub camera: &'a CameraRig,
    pub self_id: AgentId,
}

impl<'a> WorldView<'a> {
    /// Another agent, `None` if it is gone
    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&'a Agent> {
        self.agents.get(id)
    }

    /// Every other agent
    pub fn others(&self) -> impl Iterator<Item = (AgentId, &'a Agent)> + 'a {
        self.agents.iter()
    }
}

/// Per-agent decision logic
pub trait Behavior {
    type State: AnimationState;

    /// Current state
    fn state(&self) -> Self::State;

    /// State-to-clip binding
    fn binding(&self) -> &ClipBinding<Self::State>;

    /// Run one tick of decision making
    fn update(&mut self, body: &mut AgentBody, dt: f32, world: &WorldView<'_>) -> Action;
}

/// Move `state` into a new state; non-looping clips start over on entry
pub(crate) fn enter_state<S: AnimationState>(
    state: &mut S,
    next: S,
    binding: &ClipBinding<S>,
    body: &mut AgentBody,
) {
    if *state == next {
        return;
    }
    log::debug!("{:?} -> {:?}", state, next);
    *state = next;
    if !next.loops() {
        body.restart_clip(binding.clip(next));
    }
}

/// Enter `next` and play its clip from the first frame, even when already in
/// that state
pub(crate) fn reenter_state<S: AnimationState>(
    state: &mut S,
    next: S,
    binding: &ClipBinding<S>,
    body: &mut AgentBody,
) {
    if *state != next {
        log::debug!("{:?} -> {:?}", state, next);
        *state = next;
    }
    body.restart_clip(binding.clip(next));
}

/// Advance the body's animation for the behavior's current state
///
/// Looping states rewind when their clip finishes; other clips hold their
/// last frame.
pub fn animate<B: Behavior>(behavior: &B, body: &mut AgentBody, dt: f32) {
    let state = behavior.state();
    let clip = behavior
        .binding()
        .clip(state)
        .unwrap_or_else(|| body.animation.current_clip());

    if let Err(e) = body.animation.update(clip, dt * body.anim_rate) {
        log::warn!("{:?}: {}", state, e);
        return;
    }
    if state.loops() && body.animation.is_finished() {
        body.animation.reset();
    }
}
