//! Animal NPC behavior
//!
//! Chases its target inside vision range, attacks once close enough and
//! touching, otherwise stands by.

use crate::agent::AgentId;
use crate::behavior::{enter_state, reenter_state, Action, Behavior, WorldView};
use crate::body::AgentBody;
use crate::config::NpcTuning;
use crate::steering::{clamp_turn, rotate_y, signed_angle_y};
use furrow_animation::{AnimationState, ClipBinding, ClipSet, Result};

/// Animal states, one per authored clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalState {
    Attack01,
    Attack02,
    Dance,
    Death,
    Eating,
    HitReact,
    IdleSitting,
    IdleVariation,
    Idle,
    RunForward,
    SitToStand,
    StandToSit,
    TrotForward,
    Turn90L,
    Turn90R,
    WalkBackwards,
    WalkForward,
}

impl AnimalState {
    /// States the behavior cannot run without
    pub const REQUIRED: &'static [Self] = &[Self::Idle, Self::RunForward, Self::Attack01];
}

impl AnimationState for AnimalState {
    const ALL: &'static [Self] = &[
        Self::Attack01,
        Self::Attack02,
        Self::Dance,
        Self::Death,
        Self::Eating,
        Self::HitReact,
        Self::IdleSitting,
        Self::IdleVariation,
        Self::Idle,
        Self::RunForward,
        Self::SitToStand,
        Self::StandToSit,
        Self::TrotForward,
        Self::Turn90L,
        Self::Turn90R,
        Self::WalkBackwards,
        Self::WalkForward,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn clip_name(self) -> &'static str {
        match self {
            Self::Attack01 => "attack01",
            Self::Attack02 => "attack02",
            Self::Dance => "dance",
            Self::Death => "death",
            Self::Eating => "eating",
            Self::HitReact => "hitreact",
            Self::IdleSitting => "idle sitting",
            Self::IdleVariation => "idle variation",
            Self::Idle => "idle",
            Self::RunForward => "run forward",
            Self::SitToStand => "sit to stand",
            Self::StandToSit => "stand to sit",
            Self::TrotForward => "trot forward",
            Self::Turn90L => "turn 90 l",
            Self::Turn90R => "turn 90 r",
            Self::WalkBackwards => "walk backwards",
            Self::WalkForward => "walk forward",
        }
    }

    fn loops(self) -> bool {
        !matches!(
            self,
            Self::Attack01
                | Self::Attack02
                | Self::Death
                | Self::HitReact
                | Self::SitToStand
                | Self::StandToSit
                | Self::Turn90L
                | Self::Turn90R
        )
    }
}

/// Animal decision state
#[derive(Debug, Clone)]
pub struct AnimalBrain {
    pub tuning: NpcTuning,
    binding: ClipBinding<AnimalState>,
    state: AnimalState,
    target: Option<AgentId>,
}

impl AnimalBrain {
    pub fn new(tuning: NpcTuning, clips: &ClipSet) -> Result<Self> {
        Ok(Self {
            tuning,
            binding: ClipBinding::new(clips, AnimalState::REQUIRED)?,
            state: AnimalState::Idle,
            target: None,
        })
    }

    #[inline]
    pub fn target(&self) -> Option<AgentId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<AgentId>) {
        self.target = target;
    }

    fn enter(&mut self, next: AnimalState, body: &mut AgentBody) {
        enter_state(&mut self.state, next, &self.binding, body);
    }

    fn standby(&mut self, body: &mut AgentBody) -> Action {
        body.anim_rate = 1.0;
        self.enter(AnimalState::Idle, body);
        Action::Idle
    }

    fn attack(&mut self, body: &mut AgentBody, target: AgentId) -> Action {
        self.enter(AnimalState::Attack01, body);
        body.lock.begin(self.tuning.attack_duration);
        Action::Attack {
            victims: vec![target],
            damage: body.attack,
        }
    }

    fn chase(&mut self, body: &mut AgentBody, dt: f32, target: &AgentBody, world: &WorldView<'_>) -> Action {
        self.enter(AnimalState::RunForward, body);

        let to_target = (target.position - body.position).flatten();
        if to_target.length() < 0.001 {
            return Action::Idle;
        }
        let move_dir = to_target.normalize();

        let angle = clamp_turn(
            signed_angle_y(body.forward, move_dir),
            self.tuning.agent.turn_speed,
            dt,
        );
        body.set_forward(rotate_y(body.forward, angle));

        let next = body.position + move_dir * self.tuning.speed * dt;
        if world.obstacles.query_blocked(&body.prospective_hitbox(next)) {
            return Action::Blocked;
        }

        if angle.abs() < self.tuning.align_threshold {
            let from = body.position;
            body.position = next;
            Action::Moved { from, to: next }
        } else {
            Action::Turning
        }
    }
}

impl Behavior for AnimalBrain {
    type State = AnimalState;

    fn state(&self) -> AnimalState {
        self.state
    }

    fn binding(&self) -> &ClipBinding<AnimalState> {
        &self.binding
    }

    fn update(&mut self, body: &mut AgentBody, dt: f32, world: &WorldView<'_>) -> Action {
        if body.is_dead() {
            if self.state != AnimalState::Death {
                self.enter(AnimalState::Death, body);
                body.lock.clear();
                body.pending_hit = false;
                body.anim_rate = 1.0;
                body.death_timer = self.tuning.agent.death_duration;
            }
            body.tick_death(dt);
            return Action::Dead;
        }

        let Some(target_id) = self.target else {
            return self.standby(body);
        };

        if body.lock.tick(dt) {
            body.anim_rate = 1.0;
            self.enter(AnimalState::Idle, body);
        }

        if body.pending_hit {
            body.pending_hit = false;
            reenter_state(&mut self.state, AnimalState::HitReact, &self.binding, body);
            body.lock.begin(self.tuning.agent.hit_react_duration);
            body.anim_rate = 1.0;
            return Action::HitReact;
        }

        let target = match world.agent(target_id) {
            Some(target) if !target.body.is_dead() => &target.body,
            Some(_) => {
                return if body.lock.is_active() {
                    Action::Locked
                } else {
                    self.standby(body)
                };
            }
            None => {
                log::warn!("Animal target {:?} is gone; standing by", target_id);
                self.target = None;
                return if body.lock.is_active() {
                    Action::Locked
                } else {
                    self.standby(body)
                };
            }
        };

        if body.lock.is_active() {
            return Action::Locked;
        }

        let dist = body.distance_to(target.position);
        log::trace!("Distance to target: {:.1}", dist);

        if dist < self.tuning.agent.attack_range && body.world_hitbox.intersects(&target.world_hitbox) {
            return self.attack(body, target_id);
        }

        if dist < self.tuning.vision_range {
            return self.chase(body, dt, target, world);
        }

        self.standby(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_table_is_dense() {
        for (i, state) in AnimalState::ALL.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
        assert_eq!(AnimalState::ALL.len(), 17);
        assert_eq!(AnimalState::RunForward.clip_name(), "run forward");
    }

    #[test]
    fn test_turns_and_attacks_do_not_loop() {
        assert!(!AnimalState::Turn90L.loops());
        assert!(!AnimalState::Attack01.loops());
        assert!(AnimalState::RunForward.loops());
    }
}
