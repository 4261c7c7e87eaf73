//! Error types for scene setup

use furrow_animation::AnimationError;
use thiserror::Error;

/// Scene and agent setup errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// Agent content failed to load
    #[error("Animation setup failed: {0}")]
    Animation(#[from] AnimationError),

    /// Handle does not name a live agent
    #[error("Agent not found: {0}")]
    UnknownAgent(String),

    /// Operation needs an animal agent
    #[error("Agent {0} is not an animal")]
    NotAnAnimal(String),

    /// Only one player per scene
    #[error("Scene already has a player")]
    PlayerAlreadySpawned,
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
