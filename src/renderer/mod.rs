//! Rendering seam
//!
//! The simulation hands a read-only `FrameView` to a `Renderer` once per
//! frame. Pixel data and sprite images belong to the renderer; the core only
//! carries `SpriteId` handles.

pub mod ascii;

pub use ascii::AsciiRenderer;

use crate::sim::{DebugStats, Entity, TileMap};

/// Everything a renderer may look at after a frame
pub struct FrameView<'a> {
    /// Visual tile view of the level
    pub tiles: TileMap,
    pub entities: &'a [Entity],
    pub stats: DebugStats,
}

pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

impl<F: FnMut(&FrameView<'_>)> Renderer for F {
    fn render(&mut self, frame: &FrameView<'_>) {
        self(frame)
    }
}
