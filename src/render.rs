//! # Rendering Seam
//!
//! Drawing is done by whatever backend implements [`Renderer`]. The engine
//! only decides what is worth drawing: which chunks are in range, which of
//! their blocks have a face that can be seen, and where the bodies are.

use cgmath::Point3;

use crate::maths::Aabc;
use crate::voxels::block::block_side::BlockSide;
use crate::voxels::block::Block;

/// Receives draw calls for one frame.
pub trait Renderer {
    /// Called once per in-range chunk before any of its blocks are drawn.
    fn begin_chunk(&mut self, _position: Point3<i32>) {}

    /// Draws the given faces of a block at a world block coordinate.
    fn draw_block(&mut self, position: Point3<i32>, block: &Block, sides: &[BlockSide]);

    /// Draws a body's hitbox.
    fn draw_body(&mut self, _hitbox: &Aabc) {}
}

/// A renderer that only counts what it is asked to draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks visited.
    pub chunks: usize,
    /// Blocks drawn.
    pub blocks: usize,
    /// Block faces drawn.
    pub faces: usize,
    /// Bodies drawn.
    pub bodies: usize,
}

impl FrameStats {
    /// Clears the counters for the next frame.
    pub fn reset(&mut self) {
        *self = FrameStats::default();
    }
}

impl Renderer for FrameStats {
    fn begin_chunk(&mut self, _position: Point3<i32>) {
        self.chunks += 1;
    }

    fn draw_block(&mut self, _position: Point3<i32>, _block: &Block, sides: &[BlockSide]) {
        self.blocks += 1;
        self.faces += sides.len();
    }

    fn draw_body(&mut self, _hitbox: &Aabc) {
        self.bodies += 1;
    }
}
