//! Player behavior
//!
//! Camera-relative movement with wall sliding, a locked attack, and
//! picking up and putting down dead animals.

use crate::agent::{Agent, AgentId};
use crate::behavior::{enter_state, reenter_state, Action, Behavior, WorldView};
use crate::body::AgentBody;
use crate::config::PlayerTuning;
use crate::input::{Key, MouseButton};
use crate::steering::{rotate_y, turn_towards};
use furrow_animation::{AnimationState, ClipBinding, ClipSet, Result};
use furrow_math::{consts::FRAC_PI_2, Vec3};

/// Player states, one per authored clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    AttackA,
    AttackB,
    Death,
    FallLoop,
    GrabLow,
    GrabMedium,
    HitReaction,
    IdleBasic01,
    IdleBasic02,
    IdleCombat,
    IdleSitChair,
    IdleWheelbarrow,
    Jump,
    Land,
    Run,
    WalkCarry,
    WalkInplace,
    WalkWheelbarrow,
    Walk,
    WavingLHand,
    WavingRHand,
}

impl PlayerState {
    /// States the behavior cannot run without
    pub const REQUIRED: &'static [Self] = &[Self::IdleBasic01, Self::Walk, Self::Run, Self::AttackA];
}

impl AnimationState for PlayerState {
    const ALL: &'static [Self] = &[
        Self::AttackA,
        Self::AttackB,
        Self::Death,
        Self::FallLoop,
        Self::GrabLow,
        Self::GrabMedium,
        Self::HitReaction,
        Self::IdleBasic01,
        Self::IdleBasic02,
        Self::IdleCombat,
        Self::IdleSitChair,
        Self::IdleWheelbarrow,
        Self::Jump,
        Self::Land,
        Self::Run,
        Self::WalkCarry,
        Self::WalkInplace,
        Self::WalkWheelbarrow,
        Self::Walk,
        Self::WavingLHand,
        Self::WavingRHand,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn clip_name(self) -> &'static str {
        match self {
            Self::AttackA => "attack a",
            Self::AttackB => "attack b",
            Self::Death => "death",
            Self::FallLoop => "fall loop",
            Self::GrabLow => "grab low",
            Self::GrabMedium => "grab medium",
            Self::HitReaction => "hit reaction",
            Self::IdleBasic01 => "idle basic 01",
            Self::IdleBasic02 => "idle basic 02",
            Self::IdleCombat => "idle combat",
            Self::IdleSitChair => "idle sit chair",
            Self::IdleWheelbarrow => "idle whell barrow",
            Self::Jump => "jump",
            Self::Land => "land",
            Self::Run => "run",
            Self::WalkCarry => "walk carry",
            Self::WalkInplace => "walk inplace",
            Self::WalkWheelbarrow => "walk whellbarrow",
            Self::Walk => "walk",
            Self::WavingLHand => "waving l hand",
            Self::WavingRHand => "waving r hand",
        }
    }

    fn loops(self) -> bool {
        !matches!(
            self,
            Self::AttackA
                | Self::AttackB
                | Self::Death
                | Self::GrabLow
                | Self::GrabMedium
                | Self::HitReaction
                | Self::Jump
                | Self::Land
        )
    }
}

/// Player decision state
#[derive(Debug, Clone)]
pub struct PlayerBrain {
    pub tuning: PlayerTuning,
    binding: ClipBinding<PlayerState>,
    state: PlayerState,
}

impl PlayerBrain {
    pub fn new(tuning: PlayerTuning, clips: &ClipSet) -> Result<Self> {
        Ok(Self {
            tuning,
            binding: ClipBinding::new(clips, PlayerState::REQUIRED)?,
            state: PlayerState::IdleBasic01,
        })
    }

    fn enter(&mut self, next: PlayerState, body: &mut AgentBody) {
        enter_state(&mut self.state, next, &self.binding, body);
    }

    fn idle_state(body: &AgentBody) -> PlayerState {
        if body.carrying.is_some() {
            PlayerState::IdleWheelbarrow
        } else {
            PlayerState::IdleBasic01
        }
    }

    /// Where a carried agent is put down
    fn drop_action(&self, body: &AgentBody, target: AgentId) -> Action {
        let position = (body.position + body.forward * self.tuning.drop_distance).with_y(0.0);
        Action::Drop {
            target,
            position,
            forward: rotate_y(body.forward, -FRAC_PI_2),
        }
    }

    /// Live agents in reach whose hitboxes touch the player's
    fn attack_victims(&self, body: &AgentBody, world: &WorldView<'_>) -> Vec<AgentId> {
        world
            .others()
            .filter(|(_, other)| !other.body.is_dead())
            .filter(|(_, other)| body.distance_to(other.body.position) < self.tuning.agent.attack_range)
            .filter(|(_, other)| body.world_hitbox.intersects(&other.body.world_hitbox))
            .map(|(id, _)| id)
            .collect()
    }

    /// First dead, unheld animal whose hitbox touches the player's
    fn pickup_candidate(body: &AgentBody, world: &WorldView<'_>) -> Option<AgentId> {
        world
            .others()
            .find(|(_, other)| {
                Agent::is_animal(other)
                    && other.body.is_dead()
                    && other.body.held_by.is_none()
                    && body.world_hitbox.intersects(&other.body.world_hitbox)
            })
            .map(|(id, _)| id)
    }

    fn handle_action_input(&mut self, body: &mut AgentBody, world: &WorldView<'_>) -> Option<Action> {
        if world.input.button_down(MouseButton::Left) {
            self.enter(PlayerState::AttackA, body);
            body.lock.begin(self.tuning.attack_duration);
            body.anim_rate = 1.0;
            let victims = self.attack_victims(body, world);
            return Some(Action::Attack {
                victims,
                damage: body.attack,
            });
        }

        if world.input.key_pressed(Key::E) {
            if let Some(carried) = body.carrying {
                let action = self.drop_action(body, carried);
                self.enter(PlayerState::IdleBasic01, body);
                return Some(action);
            }

            match Self::pickup_candidate(body, world) {
                Some(target) => {
                    self.enter(PlayerState::GrabLow, body);
                    body.lock.begin(self.tuning.grab_duration);
                    body.anim_rate = 1.0;
                    return Some(Action::PickUp(target));
                }
                None => log::debug!("Nothing to pick up"),
            }
        }

        None
    }

    fn update_movement(&mut self, body: &mut AgentBody, dt: f32, world: &WorldView<'_>) -> Action {
        let input = world.input;
        let camera = world.camera;

        let mut move_dir = Vec3::ZERO;
        if input.key_down(Key::W) {
            move_dir += camera.forward_flat();
        }
        if input.key_down(Key::S) {
            move_dir -= camera.forward_flat();
        }
        if input.key_down(Key::A) {
            move_dir -= camera.right_flat();
        }
        if input.key_down(Key::D) {
            move_dir += camera.right_flat();
        }

        if move_dir.length() <= 0.001 {
            body.anim_rate = 1.0;
            self.enter(Self::idle_state(body), body);
            return Action::Idle;
        }

        let (state, speed) = if input.key_down(Key::Shift) {
            (PlayerState::Run, self.tuning.run_speed)
        } else if body.carrying.is_some() {
            (PlayerState::WalkCarry, self.tuning.carry_speed)
        } else {
            (PlayerState::Walk, self.tuning.walk_speed)
        };
        self.enter(state, body);

        let move_dir = move_dir.normalize();
        let (forward, _) = turn_towards(body.forward, move_dir, self.tuning.agent.turn_speed, dt);
        body.set_forward(forward);
        body.anim_rate = move_dir.length() * self.tuning.move_anim_rate;

        let from = body.position;
        let delta = world.obstacles.slide_delta(
            &body.local_hitbox,
            |p| body.basis_at(p),
            from,
            move_dir * speed * dt,
        );
        if delta == Vec3::ZERO {
            return Action::Blocked;
        }

        body.position += delta;
        Action::Moved {
            from,
            to: body.position,
        }
    }
}

impl Behavior for PlayerBrain {
    type State = PlayerState;

    fn state(&self) -> PlayerState {
        self.state
    }

    fn binding(&self) -> &ClipBinding<PlayerState> {
        &self.binding
    }

    fn update(&mut self, body: &mut AgentBody, dt: f32, world: &WorldView<'_>) -> Action {
        if body.is_dead() {
            if self.state != PlayerState::Death {
                self.enter(PlayerState::Death, body);
                body.lock.clear();
                body.pending_hit = false;
                body.anim_rate = 1.0;
                body.death_timer = self.tuning.agent.death_duration;
                if let Some(carried) = body.carrying {
                    return self.drop_action(body, carried);
                }
            }
            body.tick_death(dt);
            return Action::Dead;
        }

        if body.pending_hit {
            body.pending_hit = false;
            reenter_state(&mut self.state, PlayerState::HitReaction, &self.binding, body);
            body.lock.begin(self.tuning.agent.hit_react_duration);
            body.anim_rate = 1.0;
            return Action::HitReact;
        }

        if body.lock.tick(dt) {
            body.anim_rate = 1.0;
            self.enter(Self::idle_state(body), body);
        }

        if body.lock.is_active() {
            return Action::Locked;
        }

        if let Some(action) = self.handle_action_input(body, world) {
            return action;
        }

        self.update_movement(body, dt, world)
    }
}
