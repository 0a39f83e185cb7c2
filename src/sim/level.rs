//! Level tile data
//!
//! A level is a rectangular grid of small integers (0 = passable, anything
//! else solid). The renderer and the collision map read it through two
//! separately named views which currently share the same grid.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{TILE_HEIGHT, TILE_WIDTH};

/// Smallest accepted grid, in tiles
pub const MIN_GRID_DIM: usize = 2;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level needs at least {min} rows, got {actual}")]
    TooFewRows { min: usize, actual: usize },
    #[error("level needs at least {min} columns, got {actual}")]
    TooFewColumns { min: usize, actual: usize },
    #[error("row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("tile size must be finite and positive, got ({x}, {y})")]
    InvalidTileSize { x: f32, y: f32 },
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of a level
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelData {
    tile_size: [f32; 2],
    rows: Vec<Vec<u8>>,
}

/// Immutable tile grid, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelData", into = "LevelData")]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: Vec2,
    tiles: Vec<u8>,
}

impl TryFrom<LevelData> for TileGrid {
    type Error = LevelError;

    fn try_from(data: LevelData) -> Result<Self, Self::Error> {
        let [x, y] = data.tile_size;
        TileGrid::from_rows(&data.rows, Vec2::new(x, y))
    }
}

impl From<TileGrid> for LevelData {
    fn from(grid: TileGrid) -> Self {
        Self {
            tile_size: grid.tile_size.to_array(),
            rows: grid.rows().map(<[u8]>::to_vec).collect(),
        }
    }
}

impl TileGrid {
    /// Build a grid from row-major rows of equal length
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], tile_size: Vec2) -> Result<Self, LevelError> {
        if !(tile_size.is_finite() && tile_size.x > 0.0 && tile_size.y > 0.0) {
            return Err(LevelError::InvalidTileSize {
                x: tile_size.x,
                y: tile_size.y,
            });
        }
        if rows.len() < MIN_GRID_DIM {
            return Err(LevelError::TooFewRows {
                min: MIN_GRID_DIM,
                actual: rows.len(),
            });
        }

        let width = rows[0].as_ref().len();
        if width < MIN_GRID_DIM {
            return Err(LevelError::TooFewColumns {
                min: MIN_GRID_DIM,
                actual: width,
            });
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, tiles_in_row) in rows.iter().enumerate() {
            let tiles_in_row = tiles_in_row.as_ref();
            if tiles_in_row.len() != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    actual: tiles_in_row.len(),
                });
            }
            tiles.extend_from_slice(tiles_in_row);
        }

        Ok(Self {
            width,
            height: rows.len(),
            tile_size,
            tiles,
        })
    }

    /// Parse a grid from its JSON form
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grid width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Playfield size in world units
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size.x,
            self.height as f32 * self.tile_size.y,
        )
    }

    /// Tile code at column `i`, row `j`; `None` outside the grid
    pub fn get(&self, i: i64, j: i64) -> Option<u8> {
        if i < 0 || j < 0 {
            return None;
        }
        let (i, j) = (i as usize, j as usize);
        if i >= self.width || j >= self.height {
            return None;
        }
        Some(self.tiles[j * self.width + i])
    }

    /// Solid test with a solid border: anything outside the grid blocks
    #[inline]
    pub fn is_solid(&self, i: i64, j: i64) -> bool {
        self.get(i, j).is_none_or(|code| code != 0)
    }

    /// Tile coordinates containing a world-space point
    #[inline]
    pub fn tile_coords(&self, point: Vec2) -> (i64, i64) {
        let cell = (point / self.tile_size).floor();
        (cell.x as i64, cell.y as i64)
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.tiles.chunks(self.width)
    }
}

/// Tile grid as seen by the renderer
#[derive(Debug, Clone)]
pub struct TileMap {
    grid: Arc<TileGrid>,
}

impl TileMap {
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }
}

/// A loaded level: one visual view and one collision view
#[derive(Debug, Clone)]
pub struct Level {
    visual: Arc<TileGrid>,
    collision: Arc<TileGrid>,
}

impl Level {
    /// Both views share the same grid
    pub fn new(grid: TileGrid) -> Self {
        let grid = Arc::new(grid);
        Self {
            visual: Arc::clone(&grid),
            collision: grid,
        }
    }

    /// Separate grids for drawing and for collision
    pub fn with_collision(visual: TileGrid, collision: TileGrid) -> Self {
        Self {
            visual: Arc::new(visual),
            collision: Arc::new(collision),
        }
    }

    pub fn tile_map(&self) -> TileMap {
        TileMap {
            grid: Arc::clone(&self.visual),
        }
    }

    pub fn collision_map(&self) -> super::CollisionMap {
        super::CollisionMap::new(Arc::clone(&self.collision))
    }

    /// The built-in 30x20 arena
    pub fn default_level() -> Self {
        Self::new(TileGrid {
            width: DEFAULT_ROWS[0].len(),
            height: DEFAULT_ROWS.len(),
            tile_size: Vec2::new(TILE_WIDTH, TILE_HEIGHT),
            tiles: DEFAULT_ROWS.concat(),
        })
    }
}

const DEFAULT_ROWS: [[u8; 30]; 20] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];
