//! Tile collision detection
//!
//! Entities are point-sampled at four tile cells around their top-left
//! corner: the cell containing it, its right neighbour, and the two cells
//! below those. This is not a swept test, so a fast entity can tunnel
//! diagonally through a one-tile obstacle between two ticks.
//!
//! Cells outside the grid read as solid, so entities can never sample
//! past the playfield edge.

use std::sync::Arc;

use glam::Vec2;

use super::entity::Entity;
use super::level::TileGrid;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    /// All sampled cells are passable
    None,
    /// A cell on the entity's own row is solid
    Blocked,
    /// A cell on the row below is solid; `landed` when the entity was
    /// moving down, in which case it is now grounded
    BlockedFromAbove { landed: bool },
}

impl CollisionResult {
    #[inline]
    pub fn hit(&self) -> bool {
        !matches!(self, CollisionResult::None)
    }

    #[inline]
    pub fn landed(&self) -> bool {
        matches!(self, CollisionResult::BlockedFromAbove { landed: true })
    }
}

/// Collision view over a level's tile grid
#[derive(Debug, Clone)]
pub struct CollisionMap {
    grid: Arc<TileGrid>,
}

impl CollisionMap {
    pub fn new(grid: Arc<TileGrid>) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Check an entity at its current (tentative) position
    pub fn detect(&self, entity: &Entity) -> CollisionResult {
        self.probe(entity.position, entity.previous_position)
    }

    /// Check a reference point, using the previous point to tell whether
    /// the move was downward
    pub fn probe(&self, position: Vec2, previous_position: Vec2) -> CollisionResult {
        let (i, j) = self.grid.tile_coords(position);

        // Same row
        if self.grid.is_solid(i, j) || self.grid.is_solid(i + 1, j) {
            return CollisionResult::Blocked;
        }

        // Row below
        if self.grid.is_solid(i, j + 1) || self.grid.is_solid(i + 1, j + 1) {
            return CollisionResult::BlockedFromAbove {
                landed: previous_position.y < position.y,
            };
        }

        CollisionResult::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 6x6 open room with a solid border and one floating block at (2, 3)
    fn room() -> CollisionMap {
        let rows = [
            [1u8, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 1],
            [1, 0, 1, 0, 0, 1],
            [1, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1],
        ];
        let grid = TileGrid::from_rows(&rows, Vec2::new(16.0, 16.0)).unwrap();
        CollisionMap::new(Arc::new(grid))
    }

    #[test]
    fn test_open_space_is_clear() {
        let map = room();
        // Cells (3,1),(4,1),(3,2),(4,2) are all empty
        let pos = Vec2::new(48.0, 16.0);
        assert_eq!(map.probe(pos, pos), CollisionResult::None);
    }

    #[test]
    fn test_same_row_solid_blocks() {
        let map = room();
        // Cell (2,3) is the block; sampling from (1,3) hits it on the right
        let pos = Vec2::new(20.0, 50.0);
        assert_eq!(map.probe(pos, pos), CollisionResult::Blocked);
    }

    #[test]
    fn test_row_below_reports_landing_only_when_falling() {
        let map = room();
        // Reference in cell (2,2); block at (2,3) is directly below
        let pos = Vec2::new(36.0, 40.0);

        let falling = map.probe(pos, pos - Vec2::new(0.0, 1.0));
        assert_eq!(falling, CollisionResult::BlockedFromAbove { landed: true });
        assert!(falling.landed());

        let rising = map.probe(pos, pos + Vec2::new(0.0, 1.0));
        assert_eq!(rising, CollisionResult::BlockedFromAbove { landed: false });
        assert!(rising.hit());
        assert!(!rising.landed());

        // Pure horizontal move does not count as landing
        let sideways = map.probe(pos, pos - Vec2::new(1.0, 0.0));
        assert_eq!(sideways, CollisionResult::BlockedFromAbove { landed: false });
    }

    #[test]
    fn test_same_row_wins_over_row_below() {
        let map = room();
        // Wall cell on the same row and floor below it
        let pos = Vec2::new(0.0, 64.0);
        assert_eq!(map.probe(pos, pos), CollisionResult::Blocked);
    }

    #[test]
    fn test_outside_grid_is_blocked() {
        let map = room();
        let far = Vec2::new(1000.0, 1000.0);
        assert_eq!(map.probe(far, far), CollisionResult::Blocked);
        let above = Vec2::new(40.0, -40.0);
        assert_eq!(map.probe(above, above), CollisionResult::Blocked);
    }

    #[test]
    fn test_thin_obstacle_can_be_skipped() {
        let map = room();
        // A diagonal step from (1,1) to (3,3) never samples the block at
        // (2,3), although the point halfway along would have.
        let before = Vec2::new(16.0, 16.0);
        let halfway = Vec2::new(32.0, 32.0);
        let after = Vec2::new(48.0, 48.0);
        assert_eq!(map.probe(before, before), CollisionResult::None);
        assert_eq!(map.probe(after, before), CollisionResult::None);
        assert!(map.probe(halfway, before).hit());
    }
}
