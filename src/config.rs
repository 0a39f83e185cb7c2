//! Game configuration
//!
//! Key bindings, physics tunables and spawn points, loadable from JSON.
//! Everything is validated before a simulation is built from it so bad
//! numbers never reach the integrator.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::Key;
use crate::sim::SpriteId;

/// Logical action that pauses the loop (debug builds only)
pub const HALT_ACTION: &str = "halt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick rate must be at least 1")]
    ZeroTickRate,
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("spawn #{index} has an empty player name")]
    EmptyPlayer { index: usize },
    #[error("action {action:?} is bound to unknown key {key:?}")]
    UnknownKey { action: String, key: String },
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Physics tunables shared by all players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub anti_gravity: f32,
    /// Walk speed (x) and jump impulse (y), pixels per second
    pub speed: Vec2,
    pub max_velocity: Vec2,
    pub size: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            anti_gravity: ANTI_GRAVITY,
            speed: Vec2::new(PLAYER_SPEED_X, PLAYER_SPEED_Y),
            max_velocity: Vec2::splat(PLAYER_MAX_VELOCITY),
            size: Vec2::splat(PLAYER_SIZE),
        }
    }
}

/// Where a player starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub player: String,
    pub position: Vec2,
    #[serde(default)]
    pub sprite: SpriteId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Enables the halt action and per-frame debug stats logging
    pub debug: bool,
    /// Action name -> key name
    pub bindings: BTreeMap<String, String>,
    pub physics: PhysicsConfig,
    pub spawns: Vec<SpawnConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let bindings = [
            ("p1-right", Key::RightArrow),
            ("p1-left", Key::LeftArrow),
            ("p1-up", Key::UpArrow),
            ("p2-right", Key::D),
            ("p2-left", Key::A),
            ("p2-up", Key::W),
            (HALT_ACTION, Key::Space),
        ]
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.as_str().to_string()))
        .collect();

        Self {
            tick_rate: TICK_RATE,
            debug: true,
            bindings,
            physics: PhysicsConfig::default(),
            spawns: vec![
                SpawnConfig {
                    player: "p1".into(),
                    position: Vec2::new(384.0, 64.0),
                    sprite: SpriteId(0),
                },
                SpawnConfig {
                    player: "p2".into(),
                    position: Vec2::new(64.0, 64.0),
                    sprite: SpriteId(1),
                },
            ],
        }
    }
}

impl Config {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({} spawns, {} bindings)",
            path.display(),
            config.spawns.len(),
            config.bindings.len()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let physics = &self.physics;
        non_negative("physics.gravity", physics.gravity)?;
        non_negative("physics.anti_gravity", physics.anti_gravity)?;
        non_negative("physics.speed.x", physics.speed.x)?;
        non_negative("physics.speed.y", physics.speed.y)?;
        positive("physics.max_velocity.x", physics.max_velocity.x)?;
        positive("physics.max_velocity.y", physics.max_velocity.y)?;
        positive("physics.size.x", physics.size.x)?;
        positive("physics.size.y", physics.size.y)?;

        for (index, spawn) in self.spawns.iter().enumerate() {
            if spawn.player.is_empty() {
                return Err(ConfigError::EmptyPlayer { index });
            }
            finite("spawn.position.x", spawn.position.x)?;
            finite("spawn.position.y", spawn.position.y)?;
        }

        for (action, key) in &self.bindings {
            if Key::from_name(key).is_none() {
                return Err(ConfigError::UnknownKey {
                    action: action.clone(),
                    key: key.clone(),
                });
            }
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}
