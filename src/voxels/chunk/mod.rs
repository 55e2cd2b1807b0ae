//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data.
//!
//! ## Memory Optimization
//!
//! Chunks use a memory-efficient storage strategy:
//! - `solid_array`: A bit vector (1 bit per block) indicating which blocks are solid
//! - `blocks`: A vector containing only non-air blocks, in the order they appear in the chunk
//!
//! Air blocks, which make up most of the world above ground, only cost a bit each.
//!
//! The bit vector carries one layer of always-air padding around the chunk so
//! that neighbour lookups at the chunk border need no bounds checks. Blocks
//! on the border therefore always count as exposed on their outer faces.
//!
//! ### Performance Characteristics
//! - **Solidity Check**: O(1) - Just check the bit in `solid_array`
//! - **Block Lookup**: O(n) in the size of one plane - counts set bits from
//!   the start of the block's Z plane, whose offset is cached
//! - **Memory Usage**: ~1 bit per air block + sizeof(Block) per solid block + overhead

use bitvec::prelude::BitVec;
use cgmath::Point3;

use chunk_iteration::ChunkBlockIterator;

use crate::camera::CameraView;
use crate::render::Renderer;
use crate::traits::Renderable;

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::block::Block;

pub mod chunk_creation;
pub mod chunk_iteration;

pub use chunk_creation::ChunkBuilder;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;
/// The dimension of a chunk including an extra layer of blocks on each side for neighbor lookups.
pub const CHUNK_DIMENSION_WRAPPED: usize = (CHUNK_DIMENSION + 2) as usize;
/// The number of blocks in a wrapped 2D chunk plane.
pub const CHUNK_PLANE_SIZE_WRAPPED: usize = CHUNK_DIMENSION_WRAPPED * CHUNK_DIMENSION_WRAPPED;
/// The total number of blocks in a wrapped chunk.
pub const CHUNK_SIZE_WRAPPED: usize = CHUNK_PLANE_SIZE_WRAPPED * CHUNK_DIMENSION_WRAPPED;

/// Edge length of a block in meters.
pub const BLOCK_WIDTH: f32 = 0.5;
/// Edge length of a chunk in meters.
pub const CHUNK_WIDTH: f32 = BLOCK_WIDTH * CHUNK_DIMENSION as f32;

/// Index of a chunk-local block in the padded solid array.
fn wrapped_index(x: usize, y: usize, z: usize) -> usize {
    (x + 1) + CHUNK_DIMENSION_WRAPPED * (y + 1) + CHUNK_PLANE_SIZE_WRAPPED * (z + 1)
}

fn in_chunk(x: usize, y: usize, z: usize) -> bool {
    let d = CHUNK_DIMENSION as usize;
    x < d && y < d && z < d
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// Chunks are the unit of terrain generation and render culling. Each chunk
/// knows its position in chunk coordinates and stores only its solid blocks.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// One bit per block, including the padding layer; set for solid blocks.
    ///
    /// Bits are laid out x fastest, then y, then z.
    solid_array: BitVec,

    /// Number of solid blocks stored before each Z plane.
    offsets_at_plane: Vec<u32>,

    /// The solid blocks of this chunk, in `solid_array` order.
    ///
    /// The index of a block in this vector equals the number of set bits
    /// before its position in `solid_array`.
    blocks: Vec<Block>,
}

impl Chunk {
    pub(super) fn from_parts(
        position: Point3<i32>,
        solid_array: BitVec,
        offsets_at_plane: Vec<u32>,
        blocks: Vec<Block>,
    ) -> Self {
        Chunk {
            position,
            solid_array,
            offsets_at_plane,
            blocks,
        }
    }

    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: Point3<i32>) -> Self {
        ChunkBuilder::new(position).build()
    }

    /// Creates a new chunk completely filled with blocks of one type.
    pub fn filled(position: Point3<i32>, block_type: BlockType) -> Self {
        let mut builder = ChunkBuilder::new(position);
        for _ in 0..CHUNK_SIZE {
            builder.push_block_type(block_type);
        }
        builder.build()
    }

    /// World block coordinate of this chunk's block (0, 0, 0).
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_DIMENSION,
            self.position.y * CHUNK_DIMENSION,
            self.position.z * CHUNK_DIMENSION,
        )
    }

    /// Checks if the block at the specified chunk-relative coordinates is solid.
    ///
    /// # Returns
    /// `true` if the block is solid, `false` if it's air or out of bounds.
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        in_chunk(x, y, z) && self.solid_array[wrapped_index(x, y, z)]
    }

    /// Number of solid blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the chunk holds no solid block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Position of the block in `blocks`, if it is solid.
    fn block_offset(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if !self.is_block_solid(x, y, z) {
            return None;
        }
        let plane_start = wrapped_index(0, 0, z);
        let before = self.solid_array[plane_start..wrapped_index(x, y, z)].count_ones();
        Some(self.offsets_at_plane[z] as usize + before)
    }

    /// Gets a reference to the block at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` for air and for coordinates outside the chunk.
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> Option<&Block> {
        let offset = self.block_offset(x, y, z)?;
        self.blocks.get(offset)
    }

    /// Mutable counterpart of [`Chunk::block_at`].
    pub fn block_at_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut Block> {
        let offset = self.block_offset(x, y, z)?;
        self.blocks.get_mut(offset)
    }

    /// Turns the block at the given coordinates into air.
    ///
    /// # Returns
    /// The removed block, or `None` if there was only air.
    pub fn remove_block(&mut self, x: usize, y: usize, z: usize) -> Option<Block> {
        let offset = self.block_offset(x, y, z)?;
        let block = self.blocks.remove(offset);
        self.solid_array.set(wrapped_index(x, y, z), false);
        for plane_offset in self.offsets_at_plane.iter_mut().skip(z + 1) {
            *plane_offset -= 1;
        }
        Some(block)
    }

    /// Determines which faces of the block at (x,y,z) are adjacent to non-solid blocks.
    ///
    /// This is used for face culling during rendering to avoid drawing faces that
    /// are occluded by adjacent solid blocks.
    ///
    /// # Returns
    /// An array of 6 booleans in `BlockSide` order, true where the face is
    /// exposed and should be rendered.
    pub fn exposed_sides(&self, x: usize, y: usize, z: usize) -> [bool; 6] {
        let mut exposed = [false; 6];
        if !in_chunk(x, y, z) {
            return exposed;
        }
        let centre = wrapped_index(x, y, z);
        for side in BlockSide::all() {
            let normal = side.normal();
            let neighbour = centre as isize
                + normal.x as isize
                + CHUNK_DIMENSION_WRAPPED as isize * normal.y as isize
                + CHUNK_PLANE_SIZE_WRAPPED as isize * normal.z as isize;
            exposed[side as usize] = !self.solid_array[neighbour as usize];
        }
        exposed
    }

    /// Iterates over the solid blocks of the chunk with their chunk-local positions.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }
}

impl Renderable for Chunk {
    fn render(&self, camera: &dyn CameraView, renderer: &mut dyn Renderer) {
        renderer.begin_chunk(self.position);
        if self.is_empty() {
            return;
        }

        let facing_camera = BlockSide::get_visible_sides(camera.view_direction());
        let origin = self.origin();
        let mut sides = Vec::with_capacity(6);
        for (local, block) in self.iter_blocks() {
            let exposed = self.exposed_sides(local.x, local.y, local.z);
            sides.clear();
            sides.extend(
                facing_camera
                    .iter()
                    .copied()
                    .filter(|side| exposed[*side as usize]),
            );
            if sides.is_empty() {
                continue;
            }
            let position = Point3::new(
                origin.x + local.x as i32,
                origin.y + local.y as i32,
                origin.z + local.z as i32,
            );
            renderer.draw_block(position, block, &sides);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::render::FrameStats;
    use cgmath::Rad;

    fn origin() -> Point3<i32> {
        Point3::new(0, 0, 0)
    }

    #[test]
    fn empty_chunk_has_no_blocks() {
        let chunk = Chunk::empty(origin());
        assert!(chunk.is_empty());
        assert!(!chunk.is_block_solid(3, 4, 5));
        assert!(chunk.block_at(3, 4, 5).is_none());
    }

    #[test]
    fn filled_chunk_exposes_only_its_border() {
        let chunk = Chunk::filled(origin(), BlockType::STONE);
        assert_eq!(chunk.solid_count(), CHUNK_SIZE as usize);

        assert_eq!(chunk.exposed_sides(5, 5, 5), [false; 6]);

        let corner = chunk.exposed_sides(0, 0, 0);
        assert!(corner[BlockSide::LEFT as usize]);
        assert!(corner[BlockSide::BOTTOM as usize]);
        assert!(corner[BlockSide::BACK as usize]);
        assert!(!corner[BlockSide::RIGHT as usize]);
        assert!(!corner[BlockSide::TOP as usize]);
        assert!(!corner[BlockSide::FRONT as usize]);
    }

    #[test]
    fn lookups_find_the_right_block() {
        let mut builder = ChunkBuilder::new(origin());
        for index in 0..CHUNK_SIZE {
            let block_type = match index % 3 {
                0 => BlockType::AIR,
                1 => BlockType::DIRT,
                _ => BlockType::SAND,
            };
            builder.push_block_type(block_type);
        }
        let chunk = builder.build();

        // index = x + 16y + 256z
        assert!(chunk.block_at(0, 0, 0).is_none());
        assert_eq!(chunk.block_at(1, 0, 0).map(Block::block_type), Some(BlockType::DIRT));
        assert_eq!(chunk.block_at(2, 0, 0).map(Block::block_type), Some(BlockType::SAND));
        // 1 + 16 * 3 + 256 * 7 = 1841, 1841 % 3 == 2
        assert_eq!(chunk.block_at(1, 3, 7).map(Block::block_type), Some(BlockType::SAND));
        // 4095 % 3 == 0
        assert!(chunk.block_at(15, 15, 15).is_none());
    }

    #[test]
    fn removing_a_block_keeps_later_lookups_intact() {
        let mut chunk = Chunk::filled(origin(), BlockType::DIRT);
        if let Some(block) = chunk.block_at_mut(0, 0, 9) {
            *block = Block::new(BlockType::ORE);
        }

        let removed = chunk.remove_block(3, 3, 3);
        assert_eq!(removed.map(|block| block.block_type()), Some(BlockType::DIRT));
        assert!(!chunk.is_block_solid(3, 3, 3));
        assert!(chunk.remove_block(3, 3, 3).is_none());
        assert_eq!(chunk.solid_count(), CHUNK_SIZE as usize - 1);
        assert_eq!(chunk.block_at(0, 0, 9).map(Block::block_type), Some(BlockType::ORE));
        assert!(chunk.exposed_sides(3, 3, 4)[BlockSide::BACK as usize]);
    }

    #[test]
    fn rendering_skips_hidden_blocks() {
        let chunk = Chunk::filled(Point3::new(1, 0, 0), BlockType::STONE);
        let camera = Camera::new(Point3::new(0.0, 20.0, 0.0), Rad(0.0), Rad(0.0));
        let mut stats = FrameStats::default();

        chunk.render(&camera, &mut stats);

        // Only the 16³ - 14³ border blocks have an exposed face. Looking
        // along +X culls the right faces, which hides the 14² blocks whose
        // only exposed face is on the far side.
        assert_eq!(stats.chunks, 1);
        assert_eq!(stats.blocks, 16 * 16 * 16 - 14 * 14 * 14 - 14 * 14);
    }
}
