//! # Chunk Creation Module
//!
//! A builder that fills a chunk block by block, x fastest, then y, then z,
//! while keeping the solidity bit vector, the per-plane offsets and the
//! solid-block storage consistent with each other.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::voxels::block::{block_type::BlockType, Block};

use super::{
    Chunk, CHUNK_DIMENSION_WRAPPED, CHUNK_PLANE_SIZE_WRAPPED, CHUNK_SIZE, CHUNK_SIZE_WRAPPED,
};

/// Builds a `Chunk` from a stream of blocks.
///
/// Every pushed block advances the cursor by one position. Positions that
/// were never pushed when [`ChunkBuilder::build`] is called are left as air.
pub struct ChunkBuilder {
    /// The position of the chunk being created, in chunk coordinates
    position: Point3<i32>,
    /// Bit vector where each bit represents whether a block is solid (1) or air (0)
    ///
    /// This is stored with padding (CHUNK_DIMENSION_WRAPPED) to simplify neighbor lookups.
    solid_array: BitVec,
    /// Solid blocks pushed before each Z plane started
    offsets_at_plane: Vec<u32>,
    /// Only the non-air blocks, in push order
    blocks: Vec<Block>,
    /// Current X position within the chunk (1..CHUNK_DIMENSION_WRAPPED-1)
    ///
    /// Note the 1-based indexing to account for the padding in the solid array.
    local_x: usize,
    /// Current Y position within the chunk (1..CHUNK_DIMENSION_WRAPPED-1)
    local_y: usize,
    /// Current Z position within the chunk (1..CHUNK_DIMENSION_WRAPPED-1)
    local_z: usize,
    /// Number of positions filled so far, air included
    pushed: usize,
}

impl ChunkBuilder {
    /// Creates a new `ChunkBuilder` for building a chunk at the given position.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the chunk to create
    pub fn new(position: Point3<i32>) -> Self {
        let mut solid_array = BitVec::with_capacity(CHUNK_SIZE_WRAPPED);
        // Padding for the first plane, the first row and the first column
        solid_array.resize(CHUNK_PLANE_SIZE_WRAPPED + CHUNK_DIMENSION_WRAPPED + 1, false);

        ChunkBuilder {
            position,
            solid_array,
            offsets_at_plane: vec![0],
            blocks: Vec::new(),
            local_x: 1,
            local_y: 1,
            local_z: 1,
            pushed: 0,
        }
    }

    /// Number of blocks pushed so far, air included.
    pub fn pushed(&self) -> usize {
        self.pushed
    }

    /// Adds a fresh block of the given type at the cursor and advances it.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        self.push_block(Block::new(block_type));
    }

    /// Adds a block at the cursor and advances it. Air blocks only clear a bit.
    ///
    /// Pushes past the end of the chunk are ignored.
    pub fn push_block(&mut self, block: Block) {
        if self.pushed == CHUNK_SIZE as usize {
            return;
        }
        self.pushed += 1;

        let is_solid = block.block_type().is_solid();
        self.solid_array.push(is_solid);
        if is_solid {
            self.blocks.push(block);
        }

        self.local_x += 1;
        if self.local_x < CHUNK_DIMENSION_WRAPPED - 1 {
            return;
        }

        // End of row: skip the right padding of this row and the left one of the next
        self.solid_array.push(false);
        self.solid_array.push(false);
        self.local_x = 1;
        self.local_y += 1;
        if self.local_y < CHUNK_DIMENSION_WRAPPED - 1 {
            return;
        }

        // End of plane: the row padding above already covers one column, so
        // skip the remaining top padding row and the bottom row of the next plane
        for _ in 0..2 * CHUNK_DIMENSION_WRAPPED {
            self.solid_array.push(false);
        }
        self.local_y = 1;
        self.local_z += 1;
        if self.local_z < CHUNK_DIMENSION_WRAPPED - 1 {
            self.offsets_at_plane.push(self.blocks.len() as u32);
        }
    }

    /// Finalizes the chunk, padding any unfilled positions with air.
    pub fn build(mut self) -> Chunk {
        while self.pushed < CHUNK_SIZE as usize {
            self.push_block_type(BlockType::AIR);
        }
        self.solid_array.resize(CHUNK_SIZE_WRAPPED, false);

        Chunk::from_parts(
            self.position,
            self.solid_array,
            self.offsets_at_plane,
            self.blocks,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::chunk::CHUNK_DIMENSION;

    #[test]
    fn partial_chunks_are_padded_with_air() {
        let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0));
        builder.push_block_type(BlockType::DIRT);
        builder.push_block_type(BlockType::AIR);
        builder.push_block_type(BlockType::STONE);
        assert_eq!(builder.pushed(), 3);

        let chunk = builder.build();
        assert_eq!(chunk.solid_count(), 2);
        assert!(chunk.is_block_solid(0, 0, 0));
        assert!(!chunk.is_block_solid(1, 0, 0));
        assert!(chunk.is_block_solid(2, 0, 0));
    }

    #[test]
    fn pushes_past_the_end_are_ignored() {
        let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0));
        for _ in 0..CHUNK_SIZE + 10 {
            builder.push_block_type(BlockType::SAND);
        }
        let chunk = builder.build();
        assert_eq!(chunk.solid_count(), CHUNK_SIZE as usize);
        let last = (CHUNK_DIMENSION - 1) as usize;
        assert!(chunk.is_block_solid(last, last, last));
    }

    #[test]
    fn top_plane_lands_in_the_last_layer() {
        let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0));
        for index in 0..CHUNK_SIZE {
            let top_plane = index / (CHUNK_DIMENSION * CHUNK_DIMENSION) == CHUNK_DIMENSION - 1;
            builder.push_block_type(if top_plane { BlockType::GRASS } else { BlockType::AIR });
        }
        let chunk = builder.build();

        assert_eq!(chunk.solid_count(), (CHUNK_DIMENSION * CHUNK_DIMENSION) as usize);
        assert!(chunk.is_block_solid(7, 3, 15));
        assert!(!chunk.is_block_solid(7, 3, 14));
        assert_eq!(
            chunk.block_at(15, 15, 15).map(Block::block_type),
            Some(BlockType::GRASS)
        );
    }
}
