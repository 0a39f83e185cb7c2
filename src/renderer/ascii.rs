//! Text renderer for headless runs and tests
//!
//! One character per tile: `#` solid, `.` empty. Entities are drawn in the
//! tile holding their top-left corner as `>` or `<` depending on facing.

use super::{FrameView, Renderer};

pub const SOLID: char = '#';
pub const EMPTY: char = '.';
pub const FACING_RIGHT: char = '>';
pub const FACING_LEFT: char = '<';

#[derive(Debug, Default)]
pub struct AsciiRenderer {
    last: String,
    frames: u64,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered frame
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, frame: &FrameView<'_>) {
        self.last = draw(frame);
        self.frames += 1;
    }
}

/// Render a frame to a newline-separated grid
pub fn draw(frame: &FrameView<'_>) -> String {
    let grid = frame.tiles.grid();
    let mut cells: Vec<Vec<char>> = grid
        .rows()
        .map(|row| {
            row.iter()
                .map(|&code| if code != 0 { SOLID } else { EMPTY })
                .collect()
        })
        .collect();

    for entity in frame.entities {
        let (i, j) = grid.tile_coords(entity.position);
        if i < 0 || j < 0 {
            continue;
        }
        let glyph = if entity.is_flipped() {
            FACING_LEFT
        } else {
            FACING_RIGHT
        };
        if let Some(cell) = cells
            .get_mut(j as usize)
            .and_then(|row| row.get_mut(i as usize))
        {
            *cell = glyph;
        }
    }

    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in cells {
        out.extend(row);
        out.push('\n');
    }
    out
}
