//! Agents: a body plus the behavior that drives it

use crate::behavior::{animate, Action, Behavior, WorldView};
use crate::body::AgentBody;
use crate::config::{NpcTuning, PlayerTuning};
use crate::error::Result;
use crate::health::Health;
use crate::npc::{AnimalBrain, AnimalState};
use crate::player::{PlayerBrain, PlayerState};
use furrow_animation::{AnimationInstance, AnimationState, ClipSet};
use furrow_core::Handle;
use furrow_math::{Vec3, AABB};
use std::sync::Arc;

/// Non-owning reference to an agent in a scene
pub type AgentId = Handle<Agent>;

/// Behavior variant of an agent
#[derive(Debug, Clone)]
pub enum AgentKind {
    Player(PlayerBrain),
    Animal(AnimalBrain),
}

/// A simulated character
#[derive(Debug, Clone)]
pub struct Agent {
    pub name: String,
    pub body: AgentBody,
    pub kind: AgentKind,
}

impl Agent {
    /// Create the player character
    pub fn player(name: impl Into<String>, clips: Arc<ClipSet>, local_hitbox: AABB, tuning: PlayerTuning) -> Result<Self> {
        let brain = PlayerBrain::new(tuning, &clips)?;
        let idle = brain.binding().clip(PlayerState::IdleBasic01).unwrap_or_else(|| clips.first());
        let tuning = &brain.tuning;
        let body = AgentBody::new(
            AnimationInstance::new(clips.clone(), idle),
            local_hitbox,
            Vec3::from_array(tuning.spawn_position),
            Vec3::from_array(tuning.spawn_forward),
            Health::new(tuning.agent.max_health),
            tuning.agent.attack,
        );

        Ok(Self {
            name: name.into(),
            body,
            kind: AgentKind::Player(brain),
        })
    }

    /// Create an animal NPC with no target
    pub fn animal(name: impl Into<String>, clips: Arc<ClipSet>, local_hitbox: AABB, tuning: NpcTuning) -> Result<Self> {
        let brain = AnimalBrain::new(tuning, &clips)?;
        let idle = brain.binding().clip(AnimalState::Idle).unwrap_or_else(|| clips.first());
        let tuning = &brain.tuning;
        let body = AgentBody::new(
            AnimationInstance::new(clips.clone(), idle),
            local_hitbox,
            Vec3::from_array(tuning.spawn_position),
            Vec3::from_array(tuning.spawn_forward),
            Health::new(tuning.agent.max_health),
            tuning.agent.attack,
        );

        Ok(Self {
            name: name.into(),
            body,
            kind: AgentKind::Animal(brain),
        })
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, AgentKind::Player(_))
    }

    #[inline]
    pub fn is_animal(&self) -> bool {
        matches!(self.kind, AgentKind::Animal(_))
    }

    pub fn as_animal(&self) -> Option<&AnimalBrain> {
        match &self.kind {
            AgentKind::Animal(brain) => Some(brain),
            AgentKind::Player(_) => None,
        }
    }

    pub fn as_animal_mut(&mut self) -> Option<&mut AnimalBrain> {
        match &mut self.kind {
            AgentKind::Animal(brain) => Some(brain),
            AgentKind::Player(_) => None,
        }
    }

    /// Clip name of the current behavior state
    pub fn state_name(&self) -> &'static str {
        match &self.kind {
            AgentKind::Player(brain) => brain.state().clip_name(),
            AgentKind::Animal(brain) => brain.state().clip_name(),
        }
    }

    /// Height a carried agent sits above this one, `None` for agents that
    /// cannot carry
    pub fn hold_height(&self) -> Option<f32> {
        match &self.kind {
            AgentKind::Player(brain) => Some(brain.tuning.hold_height),
            AgentKind::Animal(_) => None,
        }
    }

    /// One tick: decide, place, animate
    ///
    /// A held agent takes its transform from its holder instead of its own
    /// position.
    pub fn update(&mut self, dt: f32, world: &WorldView<'_>) -> Action {
        let action = match &mut self.kind {
            AgentKind::Player(brain) => brain.update(&mut self.body, dt, world),
            AgentKind::Animal(brain) => brain.update(&mut self.body, dt, world),
        };

        match self.body.held_by {
            Some(holder_id) => match world.agent(holder_id) {
                Some(holder) => match holder.hold_height() {
                    Some(height) => self.body.follow_holder(&holder.body, height),
                    None => {
                        log::warn!("{}: {} cannot carry; dropping to the ground", self.name, holder.name);
                        self.body.held_by = None;
                        self.body.position.y = 0.0;
                        self.body.refresh_transforms();
                    }
                },
                None => {
                    log::warn!("{}: holder {:?} is gone; dropping to the ground", self.name, holder_id);
                    self.body.held_by = None;
                    self.body.position.y = 0.0;
                    self.body.refresh_transforms();
                }
            },
            None => self.body.refresh_transforms(),
        }

        match &self.kind {
            AgentKind::Player(brain) => animate(brain, &mut self.body, dt),
            AgentKind::Animal(brain) => animate(brain, &mut self.body, dt),
        }

        action
    }
}
