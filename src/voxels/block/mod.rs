//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the per-block
//! health state that hits wear down.

use block_type::BlockType;

use crate::items::{Item, ItemStack, PREFERRED_TOOL_MULTIPLIER};
use crate::traits::{Hittable, Killable};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure: the block type is stored as a compact
/// `BlockTypeSize`, and all per-type properties are looked up from it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,

    /// Health points left, in `[0, lifespan]`.
    health: f32,
}

impl Block {
    /// Creates a new block of the specified type at full health.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to create
    ///
    /// # Returns
    /// A new `Block` instance with the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
            health: block_type.lifespan(),
        }
    }

    /// Decodes the stored block type. Unknown values read as air.
    pub fn block_type(&self) -> BlockType {
        BlockType::from_int(self.block_type).unwrap_or(BlockType::AIR)
    }

    fn drops(&self) -> Vec<ItemStack> {
        self.block_type()
            .drops()
            .map(|item| vec![(item, 1)])
            .unwrap_or_default()
    }
}

impl Hittable for Block {
    fn hit(&mut self, with: Option<&Item>, power: f32) -> Vec<ItemStack> {
        if !self.is_alive() {
            return Vec::new();
        }

        let preferred = self.block_type().preferred_tool();
        let damage = match (with, preferred) {
            (Some(Item::Tool(tool)), Some(preferred)) if *tool == preferred => {
                power * PREFERRED_TOOL_MULTIPLIER
            }
            _ => power,
        };

        self.health = (self.health - damage.max(0.0)).clamp(0.0, self.lifespan());
        if self.is_alive() {
            Vec::new()
        } else {
            self.drops()
        }
    }
}

impl Killable for Block {
    fn kill(&mut self) -> Vec<ItemStack> {
        let was_alive = self.is_alive();
        self.health = 0.0;
        if was_alive {
            self.drops()
        } else {
            Vec::new()
        }
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn health_left(&self) -> f32 {
        self.health
    }

    fn lifespan(&self) -> f32 {
        self.block_type().lifespan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Resource, ToolType};
    use test_case::test_case;

    #[test]
    fn fresh_blocks_have_full_health() {
        let block = Block::new(BlockType::STONE);
        assert_eq!(block.health_left(), 100.0);
        assert!(block.is_alive());
    }

    #[test]
    fn bare_hands_wear_a_block_down() {
        let mut block = Block::new(BlockType::DIRT);

        assert!(block.hit(None, 10.0).is_empty());
        assert_eq!(block.health_left(), 5.0);

        let drops = block.hit(None, 10.0);
        assert_eq!(block.health_left(), 0.0);
        assert!(!block.is_alive());
        assert_eq!(drops, vec![(Item::Block(BlockType::DIRT), 1)]);
    }

    #[test_case(ToolType::Shovel, BlockType::SAND, 0.0 ; "shovel triples damage on sand")]
    #[test_case(ToolType::Pick, BlockType::SAND, 3.0 ; "pick does plain damage on sand")]
    #[test_case(ToolType::Pick, BlockType::STONE, 94.0 ; "pick triples damage on stone")]
    fn tools_multiply_damage_on_their_blocks(tool: ToolType, block_type: BlockType, left: f32) {
        let mut block = Block::new(block_type);
        block.hit(Some(&Item::Tool(tool)), 2.0);
        assert_eq!(block.health_left(), left);
    }

    #[test]
    fn killing_drops_once() {
        let mut block = Block::new(BlockType::ORE);
        assert_eq!(block.kill(), vec![(Item::Resource(Resource::Ore), 1)]);
        assert!(block.kill().is_empty());
        assert!(block.hit(None, 1.0).is_empty());
    }

    #[test]
    fn negative_power_never_heals() {
        let mut block = Block::new(BlockType::GRASS);
        block.hit(None, -50.0);
        assert_eq!(block.health_left(), block.lifespan());
    }
}
