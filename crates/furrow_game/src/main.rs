//! Furrow headless runtime
//!
//! Runs the demo farm scene at a fixed step, driven by a scripted input
//! timeline, and logs what the agents do.
//!
//! Run with: cargo run -p furrow_game
//!       or: cargo run --bin furrow
//!
//! `RUST_LOG=debug` shows every state transition.

mod demo;
mod error;
mod game_config;
mod script;

use demo::{build_scene, DemoScene};
use error::GameError;
use game_config::GameConfig;
use script::InputScript;
use std::collections::HashMap;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let config = GameConfig::load()?;
    config.print_summary();

    let DemoScene {
        mut scene,
        player,
        animals,
    } = build_scene(&config)?;
    let mut script = InputScript::new(config.script.clone());

    let dt = config.sim.dt();
    let mut last_states: HashMap<_, &'static str> = HashMap::new();

    for _ in 0..config.sim.tick_count() {
        let input = script.sample(scene.time());
        scene.tick(input, dt);

        for (id, agent) in scene.agents() {
            let state = agent.state_name();
            if last_states.insert(id, state) != Some(state) {
                log::info!("[{:6.2}s] {} -> {}", scene.time(), agent.name, state);
            }
        }
    }

    log::info!("Simulation finished after {:.2}s", scene.time());
    if !script.is_done() {
        log::warn!("Simulation ended before the input script did");
    }
    for id in std::iter::once(player).chain(animals) {
        if let Some(agent) = scene.agent(id) {
            log::info!(
                "  {}: {} at ({:.0}, {:.0}, {:.0}), health {}/{}",
                agent.name,
                agent.state_name(),
                agent.body.position.x,
                agent.body.position.y,
                agent.body.position.z,
                agent.body.health.current,
                agent.body.health.max
            );
        }
    }
    let eye = scene.camera().eye();
    log::info!("  Camera eye: ({:.0}, {:.0}, {:.0})", eye.x, eye.y, eye.z);
    log::info!("  Render frames: {}", scene.render_frames().len());

    Ok(())
}
