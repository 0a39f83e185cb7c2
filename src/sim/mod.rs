//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Stable iteration order (spawn order)
//! - No drawing or input-device code, only the `ActionSource` and
//!   `Renderer` seams

pub mod clock;
pub mod collision;
pub mod entity;
pub mod gravity;
pub mod level;
pub mod tick;

pub use clock::{DebugStats, SimulationClock};
pub use collision::{CollisionMap, CollisionResult};
pub use entity::{ACTION_LEFT, ACTION_RIGHT, ACTION_UP, Direction, Entity, SpriteId};
pub use gravity::Gravity;
pub use level::{Level, LevelError, TileGrid, TileMap};
pub use tick::{ActionSource, Simulation};
