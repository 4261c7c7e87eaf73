//! Runtime errors

use furrow_ai::SceneError;
use furrow_animation::AnimationError;
use furrow_physics::PlacementError;
use std::path::PathBuf;
use thiserror::Error;

/// Config file could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Anything that stops the demo from starting
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}
