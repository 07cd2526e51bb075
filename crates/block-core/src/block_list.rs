// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! An unordered, index-addressed collection of blocks.
//!
//! A [`BlockList`] does not validate what it is given: its single owner
//! (the arena) is trusted to add only blocks that keep the no-overlap
//! invariant. Element order carries no meaning for correctness, but it is
//! observable through first-fit placement: removal shifts the remaining
//! elements instead of swapping the last one into the hole, and new blocks
//! are appended.

use crate::{Address, Block, BlockId, Size};

/// A dense list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding a single block.
    pub fn with_block(block: Block) -> Self {
        Self {
            blocks: vec![block],
        }
    }

    /// Appends a block.
    pub fn add(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Removes and returns the block at `index`, shifting later blocks down.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Block> {
        (index < self.blocks.len()).then(|| self.blocks.remove(index))
    }

    /// Overwrites the block at `index` in place, returning the old one.
    ///
    /// Returns `None` (and leaves the list untouched) if `index` is out of
    /// bounds.
    pub fn replace_at(&mut self, index: usize, block: Block) -> Option<Block> {
        self.blocks
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, block))
    }

    /// Returns the block at `index`.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Number of blocks in the list.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the list holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates the blocks in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Returns the blocks as a slice, in list order.
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Index of the first free block of at least `size` units.
    pub fn find_free_at_least(&self, size: Size) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.is_free() && b.size() >= size)
    }

    /// Index of the used block containing `addr`.
    pub fn find_used_containing(&self, addr: Address) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| !b.is_free() && b.contains(addr))
    }

    /// Index of the block owned by `id`.
    pub fn position_of_owner(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.is_owned_by(id))
    }

    /// Sum of all block sizes.
    pub fn total_size(&self) -> Size {
        self.blocks.iter().map(Block::size).sum()
    }

    /// The largest block; the earliest one in list order wins a tie.
    pub fn largest(&self) -> Option<&Block> {
        self.blocks
            .iter()
            .fold(None, |best: Option<&Block>, b| match best {
                Some(cur) if cur.size() >= b.size() => Some(cur),
                _ => Some(b),
            })
    }

    /// Size of the largest block, or 0 for an empty list.
    pub fn largest_size(&self) -> Size {
        self.largest().map_or(0, Block::size)
    }

    /// A copy of the blocks ordered by start address.
    pub fn sorted_by_start(&self) -> Vec<Block> {
        let mut out = self.blocks.clone();
        out.sort_by_key(Block::start);
        out
    }

    /// A copy of the blocks ordered by owner id, free blocks last.
    pub fn sorted_by_owner(&self) -> Vec<Block> {
        let mut out = self.blocks.clone();
        out.sort_by_key(|b| (b.id().is_none(), b.id(), b.start()));
        out
    }
}

impl FromIterator<Block> for BlockList {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
