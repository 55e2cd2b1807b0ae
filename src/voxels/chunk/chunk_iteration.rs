//! # Chunk Iteration Module
//!
//! An iterator over the solid blocks of a chunk that walks the solidity bit
//! vector and the solid-block storage side by side, so air costs a bit test
//! and nothing more.

use cgmath::Point3;

use crate::voxels::block::Block;

use super::{Chunk, CHUNK_DIMENSION, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields each block with its chunk-local position, x fastest, then y, then z.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next unpadded position to test, `x + 16y + 256z`
    next_position: usize,
    /// Current position in the blocks vector
    current_block_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            next_position: 0,
            current_block_offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (Point3<usize>, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let dimension = CHUNK_DIMENSION as usize;
        while self.current_block_offset < self.chunk_ref.solid_count()
            && self.next_position < CHUNK_SIZE as usize
        {
            let position = self.next_position;
            self.next_position += 1;

            let x = position % dimension;
            let y = (position / dimension) % dimension;
            let z = position / (dimension * dimension);
            if !self.chunk_ref.is_block_solid(x, y, z) {
                continue;
            }

            let block = self.chunk_ref.blocks.get(self.current_block_offset)?;
            self.current_block_offset += 1;
            return Some((Point3::new(x, y, z), block));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.chunk_ref.solid_count() - self.current_block_offset;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ChunkBlockIterator<'_> {}
