//! Shared fixtures for the scenario tests

#![allow(dead_code)]

use furrow_ai::prelude::*;
use furrow_animation::{AnimationFrame, AnimationSequence, AnimationState, Bone, ClipSet, Skeleton};
use furrow_math::{Mat4, Vec3, AABB};
use furrow_physics::ObstacleSet;
use std::sync::Arc;

pub const DT: f32 = 0.1;

/// One-bone clip set with a short clip for every state
pub fn clips_for<S: AnimationState>() -> Arc<ClipSet> {
    let skeleton = Arc::new(Skeleton::new(vec![Bone::root("root")], Mat4::IDENTITY).expect("skeleton"));
    let clips = S::ALL
        .iter()
        .map(|state| {
            AnimationSequence::new(
                state.clip_name(),
                30.0,
                vec![AnimationFrame::identity(1), AnimationFrame::identity(1), AnimationFrame::identity(1)],
            )
        })
        .collect();
    Arc::new(ClipSet::new(skeleton, clips).expect("clip set"))
}

/// 50 x 100 x 50 box standing on the ground
pub fn hitbox() -> AABB {
    AABB::new(Vec3::new(-25.0, 0.0, -25.0), Vec3::new(25.0, 100.0, 25.0))
}

pub fn player_at(position: [f32; 3]) -> Agent {
    let tuning = PlayerTuning {
        spawn_position: position,
        ..PlayerTuning::default()
    };
    Agent::player("farmer", clips_for::<PlayerState>(), hitbox(), tuning).expect("player")
}

pub fn animal(tuning: NpcTuning) -> Agent {
    Agent::animal("bull", clips_for::<AnimalState>(), hitbox(), tuning).expect("animal")
}

pub fn scene(obstacles: ObstacleSet) -> Scene {
    let camera = CameraRig::new(&CameraTuning {
        initial_pitch_degrees: 0.0,
        ..CameraTuning::default()
    });
    Scene::new(obstacles, camera)
}

/// Run `ticks` ticks with the same input
pub fn run(scene: &mut Scene, input: &InputSnapshot, ticks: usize) {
    for _ in 0..ticks {
        scene.tick(input.clone(), DT);
    }
}
