//! Agent tuning
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes.

use serde::{Deserialize, Serialize};

/// Tuning shared by every agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentTuning {
    /// Maximum turn rate in radians per second
    pub turn_speed: f32,
    pub max_health: f32,
    /// Damage dealt per attack
    pub attack: f32,
    /// Attack reach, measured between positions
    pub attack_range: f32,
    /// Lock duration after being hit, in seconds
    pub hit_react_duration: f32,
    /// Time the death clip plays before the pose freezes, in seconds
    pub death_duration: f32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            turn_speed: 5.0,
            max_health: 20.0,
            attack: 5.0,
            attack_range: 200.0,
            hit_react_duration: 0.5,
            death_duration: 2.0,
        }
    }
}

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub agent: AgentTuning,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub carry_speed: f32,
    /// Lock duration of the attack, in seconds
    pub attack_duration: f32,
    /// Lock duration of a pickup, in seconds
    pub grab_duration: f32,
    /// Playback rate multiplier while moving
    pub move_anim_rate: f32,
    /// Height of a carried agent above the player
    pub hold_height: f32,
    /// How far ahead a carried agent is put down
    pub drop_distance: f32,
    pub spawn_position: [f32; 3],
    pub spawn_forward: [f32; 3],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            agent: AgentTuning {
                max_health: 100.0,
                attack: 10.0,
                ..AgentTuning::default()
            },
            walk_speed: 100.0,
            run_speed: 200.0,
            carry_speed: 70.0,
            attack_duration: 1.6,
            grab_duration: 2.5,
            move_anim_rate: 2.0,
            hold_height: 100.0,
            drop_distance: 100.0,
            spawn_position: [0.0, 0.0, 0.0],
            spawn_forward: [0.0, 0.0, 1.0],
        }
    }
}

/// Animal NPC tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcTuning {
    pub agent: AgentTuning,
    pub speed: f32,
    /// Distance within which the target is chased
    pub vision_range: f32,
    /// Lock duration of the attack, in seconds
    pub attack_duration: f32,
    /// Largest remaining turn, in radians, at which the animal still advances
    pub align_threshold: f32,
    pub spawn_position: [f32; 3],
    pub spawn_forward: [f32; 3],
}

impl Default for NpcTuning {
    fn default() -> Self {
        Self {
            agent: AgentTuning::default(),
            speed: 100.0,
            vision_range: 500.0,
            attack_duration: 1.2,
            align_threshold: 0.2,
            spawn_position: [0.0, 0.0, 500.0],
            spawn_forward: [0.0, 0.0, -1.0],
        }
    }
}

impl NpcTuning {
    /// Set the spawn position
    pub fn with_spawn(mut self, position: [f32; 3], forward: [f32; 3]) -> Self {
        self.spawn_position = position;
        self.spawn_forward = forward;
        self
    }

    /// Set vision and attack ranges
    pub fn with_ranges(mut self, vision_range: f32, attack_range: f32) -> Self {
        self.vision_range = vision_range;
        self.agent.attack_range = attack_range;
        self
    }
}

/// Third-person camera tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Distance from the orbit center
    pub distance: f32,
    /// Height of the orbit center above the followed agent
    pub height: f32,
    /// Degrees of rotation per pixel of cursor motion
    pub sensitivity: f32,
    pub initial_yaw_degrees: f32,
    pub initial_pitch_degrees: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            distance: 400.0,
            height: 150.0,
            sensitivity: 0.1,
            initial_yaw_degrees: 0.0,
            initial_pitch_degrees: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_defaults() {
        let player = PlayerTuning::default();
        assert_eq!(player.walk_speed, 100.0);
        assert_eq!(player.run_speed, 200.0);
        assert_eq!(player.carry_speed, 70.0);
        assert_eq!(player.agent.turn_speed, 5.0);

        let npc = NpcTuning::default();
        assert_eq!(npc.vision_range, 500.0);
        assert_eq!(npc.agent.attack_range, 200.0);
        assert_eq!(npc.agent.max_health, 20.0);
        assert_eq!(npc.spawn_position, [0.0, 0.0, 500.0]);
    }

    #[test]
    fn test_builders() {
        let npc = NpcTuning::default()
            .with_ranges(300.0, 50.0)
            .with_spawn([1.0, 0.0, 2.0], [1.0, 0.0, 0.0]);
        assert_eq!(npc.vision_range, 300.0);
        assert_eq!(npc.agent.attack_range, 50.0);
        assert_eq!(npc.spawn_forward, [1.0, 0.0, 0.0]);
    }
}
