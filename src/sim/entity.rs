//! Player-controlled physics body
//!
//! Positions are the top-left corner of the body in world units (pixels),
//! velocities are pixels per second. Velocity is stored unclamped and
//! bounded by `max_velocity` only where it is turned into displacement.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionMap, CollisionResult};
use super::gravity::Gravity;
use super::tick::ActionSource;
use crate::consts::*;

/// Logical action suffixes joined to a player prefix, e.g. `p1-right`
pub const ACTION_RIGHT: &str = "right";
pub const ACTION_LEFT: &str = "left";
pub const ACTION_UP: &str = "up";

/// Handle to an immutable sprite owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Resolved action names for one player
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActionNames {
    right: String,
    left: String,
    up: String,
}

impl ActionNames {
    fn for_player(player: &str) -> Self {
        Self {
            right: format!("{player}-{ACTION_RIGHT}"),
            left: format!("{player}-{ACTION_LEFT}"),
            up: format!("{player}-{ACTION_UP}"),
        }
    }
}

/// A moving body in the level
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Controller prefix, fixed at construction so it always matches
    /// `actions`
    player: String,
    actions: ActionNames,
    pub position: Vec2,
    /// Position before the current integration step
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub max_velocity: Vec2,
    pub size: Vec2,
    /// Horizontal walk speed and vertical jump impulse
    pub speed: Vec2,
    pub airborne: bool,
    pub facing_right: bool,
    pub sprite: SpriteId,
}

impl Entity {
    pub fn new(player: impl Into<String>, spawn: Vec2, sprite: SpriteId) -> Self {
        let player = player.into();
        Self {
            actions: ActionNames::for_player(&player),
            player,
            position: spawn,
            previous_position: spawn,
            velocity: Vec2::ZERO,
            max_velocity: Vec2::splat(PLAYER_MAX_VELOCITY),
            size: Vec2::splat(PLAYER_SIZE),
            speed: Vec2::new(PLAYER_SPEED_X, PLAYER_SPEED_Y),
            // Spawns in the air and falls onto the level
            airborne: true,
            facing_right: true,
            sprite,
        }
    }

    pub fn with_speed(mut self, speed: Vec2) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: Vec2) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Controller prefix this entity responds to (`p1`, `p2`)
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Full action name for one of this entity's controls
    pub fn action(&self, suffix: &str) -> String {
        format!("{}-{}", self.player, suffix)
    }

    /// Sprite should be drawn mirrored
    #[inline]
    pub fn is_flipped(&self) -> bool {
        !self.facing_right
    }

    /// Advance this entity by one fixed tick
    pub fn integrate<I: ActionSource + ?Sized>(
        &mut self,
        input: &I,
        gravity: &Gravity,
        map: &CollisionMap,
        tick_rate: f32,
    ) {
        self.previous_position = self.position;

        let pull = gravity.apply(self);
        self.velocity.y += pull;
        if input.current(&self.actions.right) {
            self.walk(Direction::Right);
        }
        if input.current(&self.actions.left) {
            self.walk(Direction::Left);
        }
        if input.current(&self.actions.up) {
            self.jump(gravity);
        }

        self.position += self.effective_velocity(tick_rate);
        // No horizontal momentum between ticks
        self.velocity.x = 0.0;

        let result = map.detect(self);
        log::trace!("{} at {:?}: {:?}", self.player, self.position, result);
        match result {
            CollisionResult::None => {
                // Standing entities flip to airborne here for one tick until
                // the next downward probe lands them again.
                self.airborne = true;
            }
            hit => {
                self.position = self.previous_position;
                self.stop();
                if hit.landed() {
                    if self.airborne {
                        log::debug!("{} landed at {:?}", self.player, self.position);
                    }
                    self.airborne = false;
                }
            }
        }
    }

    /// Set horizontal velocity for this tick and face that way
    pub fn walk(&mut self, direction: Direction) {
        match direction {
            Direction::Right => {
                self.facing_right = true;
                self.velocity.x = self.speed.x;
            }
            Direction::Left => {
                self.facing_right = false;
                self.velocity.x = -self.speed.x;
            }
        }
    }

    /// Start a jump from the ground, or stretch one that is still rising
    pub fn jump(&mut self, gravity: &Gravity) {
        if self.airborne {
            if self.velocity.y < 0.0 {
                self.velocity.y -= gravity.lift();
            }
        } else {
            self.velocity.y -= self.speed.y;
            self.airborne = true;
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Displacement for one tick, velocity clamped to `±max_velocity`
    #[inline]
    pub fn effective_velocity(&self, tick_rate: f32) -> Vec2 {
        self.velocity.clamp(-self.max_velocity, self.max_velocity) / tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::TileGrid;
    use std::sync::Arc;

    const RATE: f32 = TICK_RATE as f32;

    /// 20x20 room: solid border, everything else open
    fn open_room() -> CollisionMap {
        let mut rows = vec![vec![0u8; 20]; 20];
        for (j, row) in rows.iter_mut().enumerate() {
            for (i, tile) in row.iter_mut().enumerate() {
                if i == 0 || j == 0 || i == 19 || j == 19 {
                    *tile = 1;
                }
            }
        }
        let grid = TileGrid::from_rows(&rows, Vec2::new(16.0, 16.0)).unwrap();
        CollisionMap::new(Arc::new(grid))
    }

    fn player(x: f32, y: f32) -> Entity {
        Entity::new("p1", Vec2::new(x, y), SpriteId(0))
    }

    #[test]
    fn test_action_names_use_player_prefix() {
        let entity = Entity::new("p2", Vec2::ZERO, SpriteId(1));
        assert_eq!(entity.action(ACTION_RIGHT), "p2-right");
        assert_eq!(entity.actions.up, "p2-up");
        assert_eq!(entity.player(), "p2");
    }

    #[test]
    fn test_integrate_listens_to_its_own_action_names() {
        let map = open_room();
        let gravity = Gravity::new(0.0, 0.0);
        let mut entity = Entity::new("p2", Vec2::new(100.0, 100.0), SpriteId(1));
        let right = entity.action(ACTION_RIGHT);

        entity.integrate(&[right.as_str()][..], &gravity, &map, RATE);
        assert!(entity.position.x > 100.0);
    }

    #[test]
    fn test_walk_overwrites_and_sets_facing() {
        let mut entity = player(100.0, 100.0);
        entity.walk(Direction::Right);
        entity.walk(Direction::Right);
        assert_eq!(entity.velocity.x, PLAYER_SPEED_X);
        assert!(entity.facing_right);

        entity.walk(Direction::Left);
        assert_eq!(entity.velocity.x, -PLAYER_SPEED_X);
        assert!(entity.is_flipped());
    }

    #[test]
    fn test_effective_velocity_clamps_both_ways() {
        let mut entity = player(0.0, 0.0);
        entity.velocity = Vec2::new(-2000.0, 2000.0);
        let step = entity.effective_velocity(RATE);
        assert!((step.x - (-PLAYER_MAX_VELOCITY / RATE)).abs() < 1e-5);
        assert!((step.y - PLAYER_MAX_VELOCITY / RATE).abs() < 1e-5);
        // Storage is untouched
        assert_eq!(entity.velocity.y, 2000.0);
    }

    #[test]
    fn test_ground_jump_gives_impulse() {
        let gravity = Gravity::default();
        let mut entity = player(0.0, 0.0);
        entity.airborne = false;
        entity.jump(&gravity);
        assert!(entity.airborne);
        assert_eq!(entity.velocity.y, -PLAYER_SPEED_Y);
    }

    #[test]
    fn test_air_jump_only_extends_rising() {
        let gravity = Gravity::default();
        let mut entity = player(0.0, 0.0);

        entity.velocity.y = -100.0;
        entity.jump(&gravity);
        assert_eq!(entity.velocity.y, -100.0 - ANTI_GRAVITY);

        entity.velocity.y = 50.0;
        entity.jump(&gravity);
        assert_eq!(entity.velocity.y, 50.0);
    }

    #[test]
    fn test_integrate_falls_in_open_space() {
        let map = open_room();
        let gravity = Gravity::default();
        let mut entity = player(100.0, 50.0);

        entity.integrate(&(), &gravity, &map, RATE);
        assert_eq!(entity.previous_position, Vec2::new(100.0, 50.0));
        assert_eq!(entity.velocity.y, GRAVITY);
        assert!((entity.position.y - (50.0 + GRAVITY / RATE)).abs() < 1e-4);
        assert!(entity.airborne);
    }

    #[test]
    fn test_integrate_walking_into_wall_reverts() {
        let map = open_room();
        let gravity = Gravity::new(0.0, 0.0);
        // Right-hand samples sit in column 18; one step right reaches the border
        let mut entity = player(16.0 * 18.0 - 1.0, 100.0);
        entity.velocity.y = 30.0;

        entity.integrate(&["p1-right"][..], &gravity, &map, RATE);
        assert_eq!(entity.position, entity.previous_position);
        assert_eq!(entity.velocity, Vec2::ZERO);
        assert!(entity.facing_right);
    }

    #[test]
    fn test_integrate_ignores_other_players_actions() {
        let map = open_room();
        let gravity = Gravity::new(0.0, 0.0);
        let mut entity = player(100.0, 100.0);
        entity.integrate(&["p2-right", "p2-up"][..], &gravity, &map, RATE);
        assert_eq!(entity.position, Vec2::new(100.0, 100.0));
    }
}
