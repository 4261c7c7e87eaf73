//! Scenario tests for the agent controller
//!
//! Each test builds a small scene, drives it with scripted input and checks
//! the observable state of the agents.

mod common;

use approx::assert_relative_eq;
use common::*;
use furrow_ai::prelude::*;
use furrow_math::{Mat4, Vec3, AABB};
use furrow_physics::{InstancedObstacle, ObstacleSet};

fn idle() -> InputSnapshot {
    InputSnapshot::new()
}

fn facing_player(z: f32) -> NpcTuning {
    NpcTuning::default().with_spawn([0.0, 0.0, z], [0.0, 0.0, -1.0])
}

#[test]
fn test_chase_without_attack_when_hitboxes_apart() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let bull = scene.spawn(animal(facing_player(150.0).with_ranges(500.0, 180.0)));
    scene.set_target(bull, Some(player)).unwrap();

    scene.tick(idle(), DT);

    let bull = scene.agent(bull).unwrap();
    assert_eq!(bull.state_name(), "run forward");
    assert_relative_eq!(bull.body.position.z, 140.0, epsilon = 1e-3);
    assert_eq!(scene.agent(player).unwrap().body.health.current, 100.0);
}

#[test]
fn test_turn_is_rate_limited() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let bull = scene.spawn(animal(
        NpcTuning::default().with_spawn([0.0, 0.0, 150.0], [0.0, 0.0, 1.0]),
    ));
    scene.set_target(bull, Some(player)).unwrap();

    scene.tick(idle(), DT);

    let body = &scene.agent(bull).unwrap().body;
    // 5 rad/s over 0.1 s
    assert_relative_eq!(body.forward.dot(Vec3::Z), 0.5f32.cos(), epsilon = 1e-4);
    assert_relative_eq!(body.position.z, 150.0, epsilon = 1e-4);
}

#[test]
fn test_obstacle_vetoes_chase_step() {
    let wall = InstancedObstacle::new(
        "wall",
        AABB::from_center_half_extents(Vec3::new(0.0, 50.0, 0.0), Vec3::new(100.0, 50.0, 2.0)),
        vec![Mat4::from_translation(Vec3::new(0.0, 0.0, 118.0))],
    );
    let mut scene = scene(ObstacleSet::new().with(wall));
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let bull = scene.spawn(animal(facing_player(150.0)));
    scene.set_target(bull, Some(player)).unwrap();

    run(&mut scene, &idle(), 3);

    let bull = scene.agent(bull).unwrap();
    assert_eq!(bull.state_name(), "run forward");
    assert_relative_eq!(bull.body.position.z, 150.0, epsilon = 1e-4);
}

#[test]
fn test_animal_attack_interrupts_player() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let bull = scene.spawn(animal(facing_player(40.0)));
    scene.set_target(bull, Some(player)).unwrap();

    scene.tick(idle(), DT);
    assert_eq!(scene.agent(bull).unwrap().state_name(), "attack01");
    let farmer = scene.agent(player).unwrap();
    assert_eq!(farmer.body.health.current, 95.0);
    assert!(farmer.body.pending_hit);

    let walk = InputSnapshot::new().with_key(Key::W);
    scene.tick(walk.clone(), DT);
    let farmer = scene.agent(player).unwrap();
    assert_eq!(farmer.state_name(), "hit reaction");
    assert_relative_eq!(farmer.body.lock.remaining(), 0.5, epsilon = 1e-5);

    scene.tick(walk, DT);
    let farmer = scene.agent(player).unwrap();
    assert!(farmer.body.lock.is_active());
    assert_relative_eq!(farmer.body.position.z, 0.0, epsilon = 1e-5);
    assert_eq!(scene.agent(bull).unwrap().state_name(), "attack01");
}

#[test]
fn test_death_is_terminal() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let fragile = NpcTuning {
        agent: AgentTuning {
            max_health: 5.0,
            ..AgentTuning::default()
        },
        ..facing_player(40.0)
    };
    let bull = scene.spawn(animal(fragile));
    scene.set_target(bull, Some(player)).unwrap();

    let attack = InputSnapshot::new().with_button(MouseButton::Left);
    scene.tick(attack.clone(), DT);

    let body = &scene.agent(bull).unwrap().body;
    assert!(body.is_dead());
    assert_eq!(body.health.current, 0.0);
    assert_eq!(scene.agent(bull).unwrap().state_name(), "death");

    run(&mut scene, &attack, 30);
    let bull_agent = scene.agent_mut(bull).unwrap();
    assert_eq!(bull_agent.state_name(), "death");
    assert_eq!(bull_agent.body.anim_rate, 0.0);
    assert!(!bull_agent.body.suffer_attack(10.0));
    assert!(!bull_agent.body.pending_hit);

    // A dead animal never attacks back
    assert_eq!(scene.agent(player).unwrap().body.health.current, 100.0);
}

#[test]
fn test_second_hit_restarts_reaction_clip() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 2000.0])).unwrap();
    let bull = scene.spawn(animal(facing_player(0.0)));
    scene.set_target(bull, Some(player)).unwrap();

    assert!(scene.agent_mut(bull).unwrap().body.suffer_attack(10.0));
    scene.tick(idle(), DT);
    scene.tick(idle(), DT);

    let body = &scene.agent(bull).unwrap().body;
    assert_eq!(scene.agent(bull).unwrap().state_name(), "hitreact");
    assert!(body.animation.current_time() > 0.0);
    assert_relative_eq!(body.lock.remaining(), 0.4, epsilon = 1e-4);

    assert!(scene.agent_mut(bull).unwrap().body.suffer_attack(10.0));
    scene.tick(idle(), DT);

    let bull = scene.agent(bull).unwrap();
    assert_eq!(bull.state_name(), "hitreact");
    assert_eq!(bull.body.animation.current_time(), 0.0);
    assert_relative_eq!(bull.body.lock.remaining(), 0.5, epsilon = 1e-4);
}

#[test]
fn test_only_players_carry() {
    assert_eq!(player_at([0.0, 0.0, 0.0]).hold_height(), Some(100.0));
    assert_eq!(animal(NpcTuning::default()).hold_height(), None);
}

#[test]
fn test_pickup_and_drop() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let fragile = NpcTuning {
        agent: AgentTuning {
            max_health: 5.0,
            ..AgentTuning::default()
        },
        ..facing_player(40.0)
    };
    let bull = scene.spawn(animal(fragile));

    scene.tick(InputSnapshot::new().with_button(MouseButton::Left), DT);
    run(&mut scene, &idle(), 20);
    assert!(!scene.agent(player).unwrap().body.lock.is_active());

    let interact = InputSnapshot::new().with_key(Key::E);
    scene.tick(interact.clone(), DT);

    let farmer = scene.agent(player).unwrap();
    assert_eq!(farmer.state_name(), "grab low");
    assert_eq!(farmer.body.carrying, Some(bull));
    let carried = &scene.agent(bull).unwrap().body;
    assert_eq!(carried.held_by, Some(player));
    assert_relative_eq!(carried.position.y, 100.0, epsilon = 1e-4);

    // Holding E does not drop again
    run(&mut scene, &interact, 3);
    assert_eq!(scene.agent(player).unwrap().body.carrying, Some(bull));

    run(&mut scene, &idle(), 30);
    assert_eq!(scene.agent(player).unwrap().state_name(), "idle whell barrow");

    scene.tick(interact, DT);
    assert_eq!(scene.agent(player).unwrap().body.carrying, None);
    let dropped = &scene.agent(bull).unwrap().body;
    assert_eq!(dropped.held_by, None);
    assert!(dropped.position.abs_diff_eq(Vec3::new(0.0, 0.0, 100.0), 1e-3));
}

#[test]
fn test_pickup_ignores_live_animals() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let bull = scene.spawn(animal(facing_player(40.0)));

    scene.tick(InputSnapshot::new().with_key(Key::E), DT);

    assert_eq!(scene.agent(player).unwrap().body.carrying, None);
    assert_eq!(scene.agent(bull).unwrap().body.held_by, None);
}

#[test]
fn test_player_walks_and_runs_relative_to_camera() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();

    scene.tick(InputSnapshot::new().with_key(Key::W), DT);
    let farmer = scene.agent(player).unwrap();
    assert_eq!(farmer.state_name(), "walk");
    assert_relative_eq!(farmer.body.position.z, 10.0, epsilon = 1e-4);

    scene.tick(InputSnapshot::new().with_key(Key::W).with_key(Key::Shift), DT);
    let farmer = scene.agent(player).unwrap();
    assert_eq!(farmer.state_name(), "run");
    assert_relative_eq!(farmer.body.position.z, 30.0, epsilon = 1e-4);

    scene.camera_mut().yaw = 90.0;
    scene.tick(InputSnapshot::new().with_key(Key::W), DT);
    let farmer = scene.agent(player).unwrap();
    assert_relative_eq!(farmer.body.position.x, 10.0, epsilon = 1e-3);

    scene.tick(idle(), DT);
    assert_eq!(scene.agent(player).unwrap().state_name(), "idle basic 01");
}

#[test]
fn test_stale_target_degrades_to_standby() {
    let mut scene = scene(ObstacleSet::new());
    scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    let bull = scene.spawn(animal(facing_player(150.0)));
    let decoy = scene.spawn(animal(NpcTuning::default().with_spawn([300.0, 0.0, 0.0], [0.0, 0.0, 1.0])));
    scene.despawn(decoy);

    scene
        .agent_mut(bull)
        .and_then(Agent::as_animal_mut)
        .unwrap()
        .set_target(Some(decoy));
    scene.tick(idle(), DT);

    let bull = scene.agent(bull).unwrap();
    assert_eq!(bull.state_name(), "idle");
    assert_eq!(bull.as_animal().unwrap().target(), None);
    assert_relative_eq!(bull.body.position.z, 150.0, epsilon = 1e-5);
}

#[test]
fn test_scene_setup_errors() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    assert!(matches!(
        scene.spawn_player(player_at([10.0, 0.0, 0.0])),
        Err(SceneError::PlayerAlreadySpawned)
    ));

    assert!(matches!(
        scene.set_target(player, None),
        Err(SceneError::NotAnAnimal(_))
    ));

    let bull = scene.spawn(animal(NpcTuning::default()));
    let gone = scene.spawn(animal(NpcTuning::default()));
    scene.despawn(gone);
    assert!(matches!(
        scene.set_target(bull, Some(gone)),
        Err(SceneError::UnknownAgent(_))
    ));
}

#[test]
fn test_render_frames_cover_every_agent() {
    let mut scene = scene(ObstacleSet::new());
    let player = scene.spawn_player(player_at([0.0, 0.0, 0.0])).unwrap();
    scene.spawn(animal(NpcTuning::default()));
    scene.tick(idle(), DT);

    let frames = scene.render_frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].id, player);
    assert!(frames.iter().all(|frame| frame.bone_matrices.len() == 1));
    assert_relative_eq!(scene.time(), DT);
}
