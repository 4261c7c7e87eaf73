//! # furrow_ai - Agent Controller
//!
//! Player and animal behaviors on top of the animation and collision crates,
//! plus the third-person camera rig and the scene that ticks them.
//!
//! # Architecture
//!
//! ```text
//! InputSnapshot ──► Scene::tick ──► for each agent in spawn order:
//!                        │             lend ─► Behavior::update ─► Action
//!                        │                         │ (reads WorldView)
//!                        │             give back ◄─┘
//!                        │             apply_action (damage, pickup, drop)
//!                        ▼
//!                  render_frames()
//! ```
//!
//! # Example
//!
//! ```ignore
//! use furrow_ai::prelude::*;
//!
//! let mut scene = Scene::new(obstacles, CameraRig::new(&CameraTuning::default()));
//! let player = scene.spawn_player(Agent::player("farmer", farmer_clips, farmer_box, PlayerTuning::default())?)?;
//! let bull = scene.spawn(Agent::animal("bull", bull_clips, bull_box, NpcTuning::default())?);
//! scene.set_target(bull, Some(player))?;
//!
//! scene.tick(InputSnapshot::new().with_key(Key::W), 1.0 / 60.0);
//! ```

pub mod agent;
pub mod behavior;
pub mod body;
pub mod camera;
pub mod config;
pub mod error;
pub mod health;
pub mod input;
pub mod npc;
pub mod player;
pub mod scene;
pub mod steering;

pub mod prelude {
    //! Common imports for driving a scene
    pub use crate::agent::{Agent, AgentId, AgentKind};
    pub use crate::behavior::{animate, Action, Behavior, WorldView};
    pub use crate::body::AgentBody;
    pub use crate::camera::CameraRig;
    pub use crate::config::{AgentTuning, CameraTuning, NpcTuning, PlayerTuning};
    pub use crate::error::{Result, SceneError};
    pub use crate::health::{ActionLock, Health};
    pub use crate::input::{InputSnapshot, InputState, Key, MouseButton};
    pub use crate::npc::{AnimalBrain, AnimalState};
    pub use crate::player::{PlayerBrain, PlayerState};
    pub use crate::scene::{RenderFrame, Scene};
    pub use crate::steering::{clamp_turn, rotate_y, signed_angle_y, turn_towards};
}

pub use prelude::*;
