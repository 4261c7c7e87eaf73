//! Scene: agents, obstacles, camera and the fixed tick
//!
//! Agents update one at a time in spawn order. The updating agent is lent
//! out of the agent map so it can be mutated while everyone else is read
//! through a [`WorldView`]; the action it returns is applied before the next
//! agent runs.

use crate::agent::{Agent, AgentId};
use crate::behavior::{Action, WorldView};
use crate::camera::CameraRig;
use crate::error::{Result, SceneError};
use crate::input::{InputSnapshot, InputState};
use furrow_core::HandleMap;
use furrow_math::{Mat4, Vec3};
use furrow_physics::ObstacleSet;

/// Per-agent data the renderer consumes
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub id: AgentId,
    pub world_matrix: Mat4,
    pub hitbox_world_matrix: Mat4,
    pub bone_matrices: &'a [Mat4],
}

/// Simulation world
pub struct Scene {
    agents: HandleMap<Agent>,
    order: Vec<AgentId>,
    obstacles: ObstacleSet,
    camera: CameraRig,
    input: InputState,
    player: Option<AgentId>,
    time: f32,
}

impl Scene {
    pub fn new(obstacles: ObstacleSet, camera: CameraRig) -> Self {
        Self {
            agents: HandleMap::new(),
            order: Vec::new(),
            obstacles,
            camera,
            input: InputState::new(),
            player: None,
            time: 0.0,
        }
    }

    /// Add the player; it updates before any agent spawned later
    pub fn spawn_player(&mut self, agent: Agent) -> Result<AgentId> {
        if self.player.is_some() {
            return Err(SceneError::PlayerAlreadySpawned);
        }
        let position = agent.body.position;
        let id = self.spawn(agent);
        self.player = Some(id);
        self.camera.follow(position);
        Ok(id)
    }

    /// Add an agent at the end of the update order
    pub fn spawn(&mut self, agent: Agent) -> AgentId {
        log::info!("Spawned {} at {:?}", agent.name, agent.body.position);
        let id = self.agents.insert(agent);
        self.order.push(id);
        id
    }

    /// Remove an agent; links to it from other agents are cleared
    pub fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.agents.remove(id)?;
        self.order.retain(|other| *other != id);
        if self.player == Some(id) {
            self.player = None;
        }

        for other_id in self.order.clone() {
            if let Some(other) = self.agents.get_mut(other_id) {
                if other.body.held_by == Some(id) {
                    other.body.held_by = None;
                    other.body.position.y = 0.0;
                    other.body.refresh_transforms();
                }
                if other.body.carrying == Some(id) {
                    other.body.carrying = None;
                }
                if let Some(brain) = other.as_animal_mut() {
                    if brain.target() == Some(id) {
                        brain.set_target(None);
                    }
                }
            }
        }

        log::info!("Despawned {}", agent.name);
        Some(agent)
    }

    /// Point an animal at a target
    pub fn set_target(&mut self, animal: AgentId, target: Option<AgentId>) -> Result<()> {
        if let Some(target) = target {
            if !self.agents.contains(target) {
                return Err(SceneError::UnknownAgent(format!("{:?}", target)));
            }
        }

        let agent = self
            .agents
            .get_mut(animal)
            .ok_or_else(|| SceneError::UnknownAgent(format!("{:?}", animal)))?;
        let name = agent.name.clone();
        let brain = agent.as_animal_mut().ok_or(SceneError::NotAnAnimal(name))?;
        brain.set_target(target);
        Ok(())
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, snapshot: InputSnapshot, dt: f32) {
        self.input.begin_tick(snapshot);
        self.camera.handle_cursor(self.input.cursor());

        for i in 0..self.order.len() {
            let id = self.order[i];
            let Some(mut agent) = self.agents.lend(id) else {
                log::warn!("Agent {:?} missing from the update order", id);
                continue;
            };

            let action = {
                let world = WorldView {
                    agents: &self.agents,
                    obstacles: &self.obstacles,
                    input: &self.input,
                    camera: &self.camera,
                    self_id: id,
                };
                agent.update(dt, &world)
            };

            if self.agents.give_back(id, agent).is_err() {
                log::warn!("Agent {:?} could not be returned to the scene", id);
                continue;
            }
            self.apply_action(id, action);
        }

        if let Some(player) = self.player.and_then(|id| self.agents.get(id)) {
            self.camera.follow(player.body.position);
        }
        self.time += dt;
    }

    /// Carry out the cross-agent effects of an action
    pub fn apply_action(&mut self, actor: AgentId, action: Action) {
        match action {
            Action::Attack { victims, damage } => {
                for victim_id in victims {
                    let Some(victim) = self.agents.get_mut(victim_id) else {
                        log::warn!("Attack victim {:?} is gone", victim_id);
                        continue;
                    };
                    if victim.body.suffer_attack(damage) {
                        log::debug!(
                            "{} hit for {} ({} left)",
                            victim.name,
                            damage,
                            victim.body.health.current
                        );
                        if victim.body.is_dead() {
                            log::info!("{} died", victim.name);
                        }
                    }
                }
            }
            Action::PickUp(target_id) => {
                let Some(target) = self.agents.get_mut(target_id) else {
                    log::warn!("Pickup target {:?} is gone", target_id);
                    return;
                };
                if !target.body.is_dead() || target.body.held_by.is_some() {
                    log::debug!("{} cannot be picked up", target.name);
                    return;
                }
                target.body.held_by = Some(actor);
                if let Some(holder) = self.agents.get_mut(actor) {
                    holder.body.carrying = Some(target_id);
                    log::info!("{} picked up {:?}", holder.name, target_id);
                }
            }
            Action::Drop {
                target,
                position,
                forward,
            } => {
                if let Some(holder) = self.agents.get_mut(actor) {
                    holder.body.carrying = None;
                }
                let Some(carried) = self.agents.get_mut(target) else {
                    log::warn!("Dropped agent {:?} is gone", target);
                    return;
                };
                carried.body.held_by = None;
                carried.body.position = position;
                carried.body.set_forward(forward);
                carried.body.refresh_transforms();
                log::info!("{} put down at {:?}", carried.name, position);
            }
            _ => {}
        }
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    #[inline]
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    /// Agents in update order
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
        self.order.iter().filter_map(|&id| self.agents.get(id).map(|agent| (id, agent)))
    }

    #[inline]
    pub fn player(&self) -> Option<AgentId> {
        self.player
    }

    pub fn player_position(&self) -> Option<Vec3> {
        self.player.and_then(|id| self.agents.get(id)).map(|p| p.body.position)
    }

    #[inline]
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    #[inline]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    /// Simulated seconds so far
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// What the renderer needs for every agent
    pub fn render_frames(&self) -> Vec<RenderFrame<'_>> {
        self.agents()
            .map(|(id, agent)| RenderFrame {
                id,
                world_matrix: agent.body.world_matrix,
                hitbox_world_matrix: agent.body.hitbox_world_matrix,
                bone_matrices: agent.body.animation.bone_matrices(),
            })
            .collect()
    }
}
