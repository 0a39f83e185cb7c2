//! Gravity model
//!
//! Gravity only pulls entities that are in the air. The anti-gravity term is
//! consumed by `Entity::jump` to stretch a held jump.

use super::entity::Entity;
use crate::consts::{ANTI_GRAVITY, GRAVITY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Added to `velocity.y` every airborne tick (positive is down)
    pub constant: f32,
    /// Subtracted from `velocity.y` while ascending with jump held
    pub anti: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            constant: GRAVITY,
            anti: ANTI_GRAVITY,
        }
    }
}

impl Gravity {
    pub fn new(constant: f32, anti: f32) -> Self {
        Self { constant, anti }
    }

    /// Vertical velocity delta for this entity this tick
    #[inline]
    pub fn apply(&self, entity: &Entity) -> f32 {
        self.pull(entity.airborne)
    }

    #[inline]
    pub fn pull(&self, airborne: bool) -> f32 {
        if airborne { self.constant } else { 0.0 }
    }

    /// Anti-gravity contribution, never negative
    #[inline]
    pub fn lift(&self) -> f32 {
        self.anti.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_only_when_airborne() {
        let gravity = Gravity::default();
        assert_eq!(gravity.pull(true), GRAVITY);
        assert_eq!(gravity.pull(false), 0.0);
    }

    #[test]
    fn test_lift_floors_at_zero() {
        assert_eq!(Gravity::new(16.0, -3.0).lift(), 0.0);
        assert_eq!(Gravity::new(16.0, 8.0).lift(), 8.0);
    }
}
