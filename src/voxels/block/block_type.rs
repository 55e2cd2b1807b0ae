//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and
//! their per-type properties: durability, drops and which tools work on them.

use num_derive::FromPrimitive;

use crate::items::{Item, Resource, ToolType};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion back from the compact
/// `BlockTypeSize` stored in each `Block`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent. Never stored in chunks.
    AIR,

    /// A cube of dirt, found in the first few layers under the surface.
    DIRT,

    /// Dirt with a green topping of grass. Forms the surface of most columns.
    GRASS,

    /// Sand, easy to dig by hand. Forms beaches and dry, hot surfaces.
    SAND,

    /// Rock, the bulk of the world below the dirt layers.
    STONE,

    /// Stone carrying ore, placed by the ore gradient field.
    ORE,
}

impl BlockType {
    /// Converts a `BlockTypeSize` back to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value doesn't correspond to any block type.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Whether blocks of this type take up space and collide.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// Max health points of a fresh block of this type.
    pub fn lifespan(self) -> f32 {
        match self {
            BlockType::AIR => 0.0,
            BlockType::DIRT => 15.0,
            BlockType::GRASS => 15.0,
            BlockType::SAND => 5.0,
            BlockType::STONE => 100.0,
            BlockType::ORE => 150.0,
        }
    }

    /// The tool that digs this block type faster, if any.
    pub fn preferred_tool(self) -> Option<ToolType> {
        match self {
            BlockType::DIRT | BlockType::GRASS | BlockType::SAND => Some(ToolType::Shovel),
            BlockType::STONE | BlockType::ORE => Some(ToolType::Pick),
            BlockType::AIR => None,
        }
    }

    /// Items dropped when a block of this type is destroyed.
    pub fn drops(self) -> Option<Item> {
        match self {
            BlockType::AIR => None,
            BlockType::GRASS => Some(Item::Block(BlockType::DIRT)),
            BlockType::ORE => Some(Item::Resource(Resource::Ore)),
            other => Some(Item::Block(other)),
        }
    }
}
