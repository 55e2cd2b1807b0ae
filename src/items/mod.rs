//! # Items
//!
//! Things that can be carried: dropped blocks, tools and raw resources.

use crate::voxels::block::block_type::BlockType;

/// Anything that fits in a backpack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    /// A placeable block.
    Block(BlockType),
    /// A tool that speeds up digging the blocks it suits.
    Tool(ToolType),
    /// A raw material.
    Resource(Resource),
}

/// Kinds of digging tools.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolType {
    /// Digs dirt, grass and sand.
    Shovel,
    /// Breaks stone and ore.
    Pick,
    /// Chops wood. No block in the world prefers it yet.
    Axe,
}

/// Raw materials.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Mined from ore blocks.
    Ore,
    /// Dropped by chickens.
    Feather,
}

/// Damage multiplier for hitting a block with its preferred tool.
pub const PREFERRED_TOOL_MULTIPLIER: f32 = 3.0;

/// An item and how many of it there are.
pub type ItemStack = (Item, u8);

/// A fun alternative name for "inventory": a vector of item stacks.
pub type Backpack = Vec<ItemStack>;

/// Adds `count` of `item` to the backpack, growing an existing stack if one
/// has room.
pub fn stash(backpack: &mut Backpack, item: Item, count: u8) {
    let mut remaining = count;
    for (stacked, size) in backpack.iter_mut() {
        if *stacked == item && *size < u8::MAX {
            let moved = remaining.min(u8::MAX - *size);
            *size += moved;
            remaining -= moved;
            if remaining == 0 {
                return;
            }
        }
    }
    if remaining > 0 {
        backpack.push((item, remaining));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stash_grows_matching_stacks() {
        let mut backpack = Backpack::new();
        stash(&mut backpack, Item::Resource(Resource::Ore), 2);
        stash(&mut backpack, Item::Block(BlockType::DIRT), 1);
        stash(&mut backpack, Item::Resource(Resource::Ore), 3);

        assert_eq!(
            backpack,
            vec![
                (Item::Resource(Resource::Ore), 5),
                (Item::Block(BlockType::DIRT), 1)
            ]
        );
    }

    #[test]
    fn full_stacks_spill_into_new_ones() {
        let mut backpack = vec![(Item::Block(BlockType::SAND), 250)];
        stash(&mut backpack, Item::Block(BlockType::SAND), 10);

        assert_eq!(
            backpack,
            vec![
                (Item::Block(BlockType::SAND), 255),
                (Item::Block(BlockType::SAND), 5)
            ]
        );
    }
}
