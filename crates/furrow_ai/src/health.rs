//! Health and the action lock

use serde::{Deserialize, Serialize};

/// Hit points with a terminal dead flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            dead: max <= 0.0,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Remaining health as a fraction of the maximum
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Subtract damage, clamping at zero
    ///
    /// Returns `false` without effect once dead.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }

        self.current = (self.current - amount).max(0.0);
        if self.current <= 0.0 {
            self.dead = true;
        }
        true
    }
}

/// Countdown that blocks movement and new actions while it runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLock {
    active: bool,
    timer: f32,
}

impl ActionLock {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds left, zero when inactive
    #[inline]
    pub fn remaining(&self) -> f32 {
        if self.active { self.timer } else { 0.0 }
    }

    /// Start the lock, replacing whatever time was left
    pub fn begin(&mut self, duration: f32) {
        self.active = true;
        self.timer = duration;
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.timer = 0.0;
    }

    /// Count down; returns `true` on the tick the lock expires
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }

        self.timer -= dt;
        if self.timer <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }
}
