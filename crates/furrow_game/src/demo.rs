//! Demo farm scene
//!
//! Procedural stand-ins for authored content: a three-bone rig with a sway
//! clip per state, a fenced paddock, one farmer and the configured animals.

use crate::error::GameError;
use crate::game_config::GameConfig;
use furrow_ai::{Agent, AgentId, AnimalState, CameraRig, PlayerState, Scene};
use furrow_animation::{AnimationFrame, AnimationSequence, AnimationState, Bone, ClipSet, Skeleton};
use furrow_math::{consts::TAU, Mat4, Quat, Vec3, AABB};
use furrow_physics::{load_placements, save_placements, InstancedObstacle, ObstacleSet};
use std::sync::Arc;

const FRAMES_PER_CLIP: usize = 16;
const TICKS_PER_SECOND: f32 = 24.0;

/// Root, spine and head
fn demo_skeleton(spine_height: f32, head_height: f32) -> Result<Skeleton, GameError> {
    let bones = vec![
        Bone::root("root"),
        Bone::new(
            "spine",
            Mat4::from_translation(Vec3::new(0.0, -spine_height, 0.0)),
            Some(0),
        ),
        Bone::new(
            "head",
            Mat4::from_translation(Vec3::new(0.0, -head_height, 0.0)),
            Some(1),
        ),
    ];
    Ok(Skeleton::new(bones, Mat4::IDENTITY)?)
}

/// Spine sway; each state gets its own amplitude so poses differ
fn sway_clip(name: &str, variant: usize, spine_height: f32, head_height: f32) -> AnimationSequence {
    let amplitude = 0.05 + 0.02 * variant as f32;
    let frames = (0..FRAMES_PER_CLIP)
        .map(|i| {
            let phase = TAU * i as f32 / (FRAMES_PER_CLIP - 1) as f32;
            AnimationFrame::new(
                vec![
                    Vec3::ZERO,
                    Vec3::new(0.0, spine_height, 0.0),
                    Vec3::new(0.0, head_height - spine_height, 0.0),
                ],
                vec![
                    Quat::IDENTITY,
                    Quat::from_rotation_y(amplitude * phase.sin()),
                    Quat::from_rotation_x(0.5 * amplitude * phase.cos()),
                ],
                vec![Vec3::ONE; 3],
            )
        })
        .collect();
    AnimationSequence::new(name, TICKS_PER_SECOND, frames)
}

/// Clip set with one clip per state of `S`
pub fn demo_clips<S: AnimationState>(spine_height: f32, head_height: f32) -> Result<Arc<ClipSet>, GameError> {
    let skeleton = Arc::new(demo_skeleton(spine_height, head_height)?);
    let clips = S::ALL
        .iter()
        .map(|state| sway_clip(state.clip_name(), state.index(), spine_height, head_height))
        .collect();
    Ok(Arc::new(ClipSet::new(skeleton, clips)?))
}

pub fn farmer_hitbox() -> AABB {
    AABB::new(Vec3::new(-40.0, 0.0, -40.0), Vec3::new(40.0, 180.0, 40.0))
}

pub fn animal_hitbox() -> AABB {
    AABB::new(Vec3::new(-50.0, 0.0, -90.0), Vec3::new(50.0, 140.0, 90.0))
}

/// Fence post model, lying along local Z before its yaw fix-up
pub fn fence_post_bounds() -> AABB {
    AABB::new(Vec3::new(-0.05, 0.0, -0.5), Vec3::new(0.05, 1.0, 0.5))
}

/// Fence post transforms from the placement file, or the generator
///
/// A configured file that does not exist yet is written from the generator.
pub fn fence_placements(config: &GameConfig) -> Result<Vec<Mat4>, GameError> {
    match &config.placement_file {
        Some(path) if path.exists() => Ok(load_placements(path)?),
        Some(path) => {
            let posts = config.fence.generate();
            save_placements(path, &posts)?;
            log::info!("Wrote {} generated placements to {}", posts.len(), path.display());
            Ok(posts)
        }
        None => Ok(config.fence.generate()),
    }
}

/// Scene plus the handles the runtime reports on
pub struct DemoScene {
    pub scene: Scene,
    pub player: AgentId,
    pub animals: Vec<AgentId>,
}

/// Assemble the demo scene; every animal hunts the player
pub fn build_scene(config: &GameConfig) -> Result<DemoScene, GameError> {
    let posts = fence_placements(config)?;
    let obstacles = ObstacleSet::new().with(InstancedObstacle::new("fence", fence_post_bounds(), posts));

    let mut scene = Scene::new(obstacles, CameraRig::new(&config.camera));

    let farmer_clips = demo_clips::<PlayerState>(100.0, 160.0)?;
    let player = scene.spawn_player(Agent::player(
        "farmer",
        farmer_clips,
        farmer_hitbox(),
        config.player.clone(),
    )?)?;

    let animal_clips = demo_clips::<AnimalState>(70.0, 120.0)?;
    let mut animals = Vec::with_capacity(config.npcs.len());
    for npc in &config.npcs {
        let mut agent = Agent::animal(&npc.name, animal_clips.clone(), animal_hitbox(), npc.tuning.clone())?;
        agent.body = agent.body.with_model_adjust(Mat4::from_rotation_y(core::f32::consts::PI));
        let id = scene.spawn(agent);
        scene.set_target(id, Some(player))?;
        animals.push(id);
    }

    Ok(DemoScene {
        scene,
        player,
        animals,
    })
}
