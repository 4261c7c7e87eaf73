//! Game configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variable: `FURROW_CONFIG=/path/to/furrow.toml`
//! 2. Config file: `furrow.toml` in the working directory
//! 3. Built-in defaults
//!
//! Every section is optional; missing keys keep their defaults.
//!
//! # Example Config File
//!
//! ```toml
//! placement_file = "Save/fence_matrix.txt"
//!
//! [sim]
//! tick_rate = 60.0
//! duration_seconds = 20.0
//!
//! [player]
//! walk_speed = 120.0
//!
//! [[npcs]]
//! name = "bull"
//! speed = 90.0
//! vision_range = 600.0
//! spawn_position = [0.0, 0.0, 500.0]
//!
//! [fence]
//! width = 1500.0
//! depth = 1500.0
//! ```

use crate::error::ConfigError;
use crate::script::{demo_script, ScriptStep};
use furrow_ai::{CameraTuning, NpcTuning, PlayerTuning};
use furrow_physics::FenceLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "FURROW_CONFIG";

/// Config file looked for in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "furrow.toml";

/// Fixed-step simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per simulated second
    pub tick_rate: f32,
    pub duration_seconds: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            duration_seconds: 20.0,
        }
    }
}

impl SimConfig {
    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        if self.tick_rate > 0.0 {
            1.0 / self.tick_rate
        } else {
            1.0 / 60.0
        }
    }

    pub fn tick_count(&self) -> usize {
        (self.duration_seconds.max(0.0) / self.dt()).round() as usize
    }
}

/// One animal in the demo scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub name: String,
    #[serde(flatten)]
    pub tuning: NpcTuning,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            name: "bull".to_string(),
            tuning: NpcTuning::default(),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sim: SimConfig,
    pub player: PlayerTuning,
    pub npcs: Vec<NpcConfig>,
    pub camera: CameraTuning,
    /// Fence generator used when there is no placement file
    pub fence: FenceLayout,
    /// Fence post transforms; generated and written here if missing
    pub placement_file: Option<PathBuf>,
    /// Input timeline driving the player
    pub script: Vec<ScriptStep>,
    /// File this config was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            player: PlayerTuning::default(),
            npcs: vec![NpcConfig::default()],
            camera: CameraTuning::default(),
            fence: FenceLayout::default(),
            placement_file: None,
            script: demo_script(),
            config_path: None,
        }
    }
}

impl GameConfig {
    /// Load from the first available source
    ///
    /// A file named by `FURROW_CONFIG` must load; the working-directory file
    /// is used only if present.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                log::info!("Config from env: {}", path);
                return Self::load_from_file(path);
            }
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::load_from_file(DEFAULT_CONFIG_FILE);
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Game Configuration:");
        log::info!(
            "  Sim: {} ticks at {} Hz ({} s)",
            self.sim.tick_count(),
            self.sim.tick_rate,
            self.sim.duration_seconds
        );
        log::info!(
            "  Player: walk {} / run {} / carry {}, health {}",
            self.player.walk_speed,
            self.player.run_speed,
            self.player.carry_speed,
            self.player.agent.max_health
        );
        for npc in &self.npcs {
            log::info!(
                "  NPC {}: speed {}, vision {}, attack range {}",
                npc.name,
                npc.tuning.speed,
                npc.tuning.vision_range,
                npc.tuning.agent.attack_range
            );
        }
        match &self.placement_file {
            Some(path) => log::info!("  Placements: {}", path.display()),
            None => log::info!(
                "  Placements: generated {}x{} fence",
                self.fence.width,
                self.fence.depth
            ),
        }
        log::info!("  Script: {} steps", self.script.len());
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.sim.tick_count(), 1200);
        assert_eq!(config.npcs.len(), 1);
        assert_eq!(config.player.run_speed, 200.0);
        assert!(config.placement_file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let text = r#"
            placement_file = "fence.txt"

            [sim]
            duration_seconds = 5.0

            [player]
            walk_speed = 120.0

            [[npcs]]
            name = "cow"
            vision_range = 300.0

            [[npcs]]
            name = "pig"
        "#;
        let config: GameConfig = toml::from_str(text).unwrap();

        assert_eq!(config.sim.tick_rate, 60.0);
        assert_eq!(config.sim.tick_count(), 300);
        assert_eq!(config.player.walk_speed, 120.0);
        assert_eq!(config.player.run_speed, 200.0);
        assert_eq!(config.npcs.len(), 2);
        assert_eq!(config.npcs[0].name, "cow");
        assert_eq!(config.npcs[0].tuning.vision_range, 300.0);
        assert_eq!(config.npcs[1].tuning.speed, 100.0);
        assert_eq!(config.placement_file, Some(PathBuf::from("fence.txt")));
        assert!(!config.script.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_value_is_parse_error() {
        let dir = std::env::temp_dir().join("furrow_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[sim]\ntick_rate = \"fast\"\n").unwrap();

        let err = GameConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
