//! Berek - a two-player tile platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, integration, tile collision, fixed-step loop)
//! - `platform`: Input collaborator (key bindings, held logical actions)
//! - `renderer`: Renderer seam plus a text renderer for headless runs
//! - `config`: Data-driven physics, bindings and spawns

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{Config, ConfigError, PhysicsConfig, SpawnConfig};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const TICK_DURATION_MS: f64 = 1000.0 / TICK_RATE as f64;

    /// Playfield dimensions (pixels)
    pub const VIEWPORT_WIDTH: u32 = 480;
    pub const VIEWPORT_HEIGHT: u32 = 320;

    /// Tile dimensions (pixels)
    pub const TILE_WIDTH: f32 = 16.0;
    pub const TILE_HEIGHT: f32 = 16.0;

    /// Downward pull added to vertical velocity each airborne tick
    pub const GRAVITY: f32 = 16.0;
    /// Extra upward push per tick while jump is held on the way up
    pub const ANTI_GRAVITY: f32 = 8.0;

    /// Player defaults (pixels per second)
    pub const PLAYER_SPEED_X: f32 = 192.0;
    pub const PLAYER_SPEED_Y: f32 = 256.0;
    pub const PLAYER_MAX_VELOCITY: f32 = 512.0;
    pub const PLAYER_SIZE: f32 = 16.0;

    /// Frames needing more catch-up ticks than this are logged
    pub const CATCH_UP_WARN_TICKS: u32 = 8;
}
