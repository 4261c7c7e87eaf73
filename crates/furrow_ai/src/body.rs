//! Agent body: the state every agent shares regardless of its behavior

use crate::agent::AgentId;
use crate::health::{ActionLock, Health};
use crate::steering::rotate_y;
use furrow_animation::{AnimationInstance, ClipId};
use furrow_math::{consts::FRAC_PI_2, Mat4, Vec3, AABB};

/// Transform, vitals and animation of one agent
#[derive(Debug, Clone)]
pub struct AgentBody {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    /// Model-to-world, including `model_adjust`
    pub world_matrix: Mat4,
    /// Hitbox-to-world
    pub hitbox_world_matrix: Mat4,
    /// Fix-up for the model's authored orientation
    pub model_adjust: Mat4,
    pub health: Health,
    pub attack: f32,
    pub lock: ActionLock,
    pub animation: AnimationInstance,
    pub local_hitbox: AABB,
    pub world_hitbox: AABB,
    /// Multiplier on animation time
    pub anim_rate: f32,
    /// Set when hit; consumed by the next update
    pub pending_hit: bool,
    /// Seconds of death clip left before the pose freezes
    pub death_timer: f32,
    pub held_by: Option<AgentId>,
    pub carrying: Option<AgentId>,
}

impl AgentBody {
    pub fn new(
        animation: AnimationInstance,
        local_hitbox: AABB,
        position: Vec3,
        forward: Vec3,
        health: Health,
        attack: f32,
    ) -> Self {
        let mut body = Self {
            position,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_matrix: Mat4::IDENTITY,
            hitbox_world_matrix: Mat4::IDENTITY,
            model_adjust: Mat4::IDENTITY,
            health,
            attack,
            lock: ActionLock::default(),
            animation,
            local_hitbox,
            world_hitbox: local_hitbox,
            anim_rate: 1.0,
            pending_hit: false,
            death_timer: 0.0,
            held_by: None,
            carrying: None,
        };
        body.set_forward(forward);
        body.refresh_transforms();
        body
    }

    pub fn with_model_adjust(mut self, adjust: Mat4) -> Self {
        self.model_adjust = adjust;
        self.refresh_transforms();
        self
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Face a ground-plane direction; a zero direction keeps the old facing
    pub fn set_forward(&mut self, forward: Vec3) {
        if let Some(forward) = forward.flatten().try_normalize() {
            self.forward = forward;
            self.right = self.up.cross(forward).normalize();
        }
    }

    /// Hitbox-to-world matrix the agent would have at `position`
    #[inline]
    pub fn basis_at(&self, position: Vec3) -> Mat4 {
        Mat4::from_basis(self.right, self.up, self.forward, position)
    }

    /// World hitbox the agent would have at `position`
    #[inline]
    pub fn prospective_hitbox(&self, position: Vec3) -> AABB {
        self.local_hitbox.transform(&self.basis_at(position))
    }

    /// Rebuild the world matrices and hitbox from position and facing
    pub fn refresh_transforms(&mut self) {
        self.hitbox_world_matrix = self.basis_at(self.position);
        self.world_matrix = self.hitbox_world_matrix * self.model_adjust;
        self.world_hitbox = self.local_hitbox.transform(&self.hitbox_world_matrix);
    }

    /// Take a transform from a carrying agent
    ///
    /// Sits `hold_height` above the holder, facing the holder's forward
    /// turned -90 degrees about Y.
    pub fn follow_holder(&mut self, holder: &AgentBody, hold_height: f32) {
        self.position = holder.position + Vec3::new(0.0, hold_height, 0.0);
        self.set_forward(rotate_y(holder.forward, -FRAC_PI_2));
        self.refresh_transforms();
    }

    /// Take damage; returns `false` if already dead
    ///
    /// A hit that leaves the agent alive queues a hit reaction.
    pub fn suffer_attack(&mut self, damage: f32) -> bool {
        if !self.health.apply_damage(damage) {
            return false;
        }
        self.pending_hit = !self.health.is_dead();
        true
    }

    /// Play a clip from its first frame
    pub fn restart_clip(&mut self, clip: Option<ClipId>) {
        if let Some(clip) = clip {
            self.animation.restart(clip);
        }
    }

    /// Distance to a point
    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.position).length()
    }

    /// Run the death countdown; the pose freezes once it runs out
    pub fn tick_death(&mut self, dt: f32) {
        if self.death_timer >= 0.0 {
            self.death_timer -= dt;
        } else {
            self.anim_rate = 0.0;
        }
    }
}
