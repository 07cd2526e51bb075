// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Block descriptors and ownership tags.

use crate::BlockError;
use std::fmt;

/// An offset into the simulated address space.
pub type Address = u64;

/// A number of address units.
pub type Size = u64;

/// Identifies a used allocation.
///
/// Ids are supplied by the caller. They must be unique among the blocks that
/// are *currently* allocated, but may be reused once the owning block has
/// been released.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Ownership tag of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// The range is available for allocation.
    Free,
    /// The range belongs to the allocation with this id.
    Used(BlockId),
}

/// An immutable, contiguous address range `[start, end)` with an owner.
///
/// Blocks are plain values. Moving a block between lists means removing it
/// from one and adding a (possibly transformed) copy to the other; nothing
/// is shared by reference.
///
/// # Examples
/// ```
/// use block_core::Block;
///
/// let a = Block::free(0, 10);
/// let b = Block::free(10, 5);
/// assert!(a.is_adjacent(&b));
///
/// let merged = a.merge(&b).unwrap();
/// assert_eq!(merged.range(), (0, 15));
/// assert_eq!(merged.size(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Block {
    owner: Owner,
    start: Address,
    end: Address,
}

impl Block {
    /// Creates a free block of `size` units starting at `start`.
    pub fn free(start: Address, size: Size) -> Self {
        Self {
            owner: Owner::Free,
            start,
            end: start + size,
        }
    }

    /// Creates a used block of `size` units owned by `id`.
    pub fn used(id: BlockId, start: Address, size: Size) -> Self {
        Self {
            owner: Owner::Used(id),
            start,
            end: start + size,
        }
    }

    /// Creates a block from explicit bounds.
    ///
    /// Returns `Err(InvalidRange)` if `end < start`.
    pub fn from_range(owner: Owner, start: Address, end: Address) -> Result<Self, BlockError> {
        if end < start {
            return Err(BlockError::InvalidRange { start, end });
        }
        Ok(Self { owner, start, end })
    }

    /// Returns the ownership tag.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Returns the owning id, or `None` for a free block.
    pub fn id(&self) -> Option<BlockId> {
        match self.owner {
            Owner::Free => None,
            Owner::Used(id) => Some(id),
        }
    }

    /// Returns `true` if this block is free.
    pub fn is_free(&self) -> bool {
        self.owner == Owner::Free
    }

    /// Returns `true` if this block is owned by `id`.
    pub fn is_owned_by(&self, id: BlockId) -> bool {
        self.owner == Owner::Used(id)
    }

    /// First address covered by the block.
    pub fn start(&self) -> Address {
        self.start
    }

    /// One past the last address covered by the block.
    pub fn end(&self) -> Address {
        self.end
    }

    /// Returns `(start, end)`.
    pub fn range(&self) -> (Address, Address) {
        (self.start, self.end)
    }

    /// Number of units covered.
    pub fn size(&self) -> Size {
        self.end - self.start
    }

    /// Returns `true` if `addr` lies inside `[start, end)`.
    pub fn contains(&self, addr: Address) -> bool {
        self.start <= addr && addr < self.end
    }

    /// Returns `true` if the two blocks touch at a boundary.
    pub fn is_adjacent(&self, other: &Block) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Returns `true` if the two ranges share at least one address.
    ///
    /// Empty ranges never overlap anything.
    pub fn overlaps(&self, other: &Block) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns a free copy of this block covering the same range.
    pub fn as_free(&self) -> Block {
        Block {
            owner: Owner::Free,
            ..*self
        }
    }

    /// Merges two adjacent free blocks into one.
    ///
    /// The result starts at the lower of the two starts and its size is the
    /// sum of both sizes.
    pub fn merge(&self, other: &Block) -> Result<Block, BlockError> {
        for b in [self, other] {
            if !b.is_free() {
                return Err(BlockError::NotFree {
                    start: b.start,
                    end: b.end,
                });
            }
        }
        if !self.is_adjacent(other) {
            return Err(BlockError::NotAdjacent {
                a_start: self.start,
                a_end: self.end,
                b_start: other.start,
                b_end: other.end,
            });
        }
        Ok(Block::free(
            self.start.min(other.start),
            self.size() + other.size(),
        ))
    }

    /// Carves a used block of `size` units owned by `id` off the front of
    /// this free block.
    ///
    /// Returns the used block and the free remainder (`None` on an exact fit).
    pub fn split_off(&self, id: BlockId, size: Size) -> Result<(Block, Option<Block>), BlockError> {
        if !self.is_free() {
            return Err(BlockError::NotFree {
                start: self.start,
                end: self.end,
            });
        }
        if size > self.size() {
            return Err(BlockError::SplitTooLarge {
                requested: size,
                available: self.size(),
            });
        }

        let used = Block::used(id, self.start, size);
        let rest = (size < self.size()).then(|| Block {
            owner: Owner::Free,
            start: self.start + size,
            end: self.end,
        });
        Ok((used, rest))
    }
}

/// Report form: `<id>;<start>;<end>` for used blocks, `<start>;<end>` for
/// free blocks.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Owner::Free => write!(f, "{};{}", self.start, self.end),
            Owner::Used(id) => write!(f, "{id};{};{}", self.start, self.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_creation() {
        let b = Block::free(0, 10);
        assert!(b.is_free());
        assert_eq!(b.size(), 10);
        assert_eq!(b.start(), 0);
        assert_eq!(b.end(), 10);
        assert_eq!(b.id(), None);
    }

    #[test]
    fn test_used_creation() {
        let b = Block::used(BlockId(3), 5, 10);
        assert!(!b.is_free());
        assert!(b.is_owned_by(BlockId(3)));
        assert_eq!(b.range(), (5, 15));
        assert_eq!(b.id(), Some(BlockId(3)));
    }

    #[test]
    fn test_from_range_rejects_inverted() {
        let err = Block::from_range(Owner::Free, 10, 5).unwrap_err();
        assert_eq!(err, BlockError::InvalidRange { start: 10, end: 5 });
        assert!(Block::from_range(Owner::Free, 5, 5).is_ok());
    }

    #[test]
    fn test_adjacency_is_exclusive_end() {
        let a = Block::free(0, 100);
        let b = Block::free(100, 100);
        let c = Block::free(250, 100);
        assert!(a.is_adjacent(&b));
        assert!(b.is_adjacent(&a));
        assert!(!a.is_adjacent(&c));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_overlap() {
        let a = Block::free(0, 10);
        assert!(a.overlaps(&Block::free(9, 5)));
        assert!(!a.overlaps(&Block::free(10, 5)));
        assert!(!a.overlaps(&Block::free(3, 0)));
    }

    #[test]
    fn test_contains() {
        let b = Block::free(10, 5);
        assert!(b.contains(10));
        assert!(b.contains(14));
        assert!(!b.contains(15));
        assert!(!b.contains(9));
    }

    #[test]
    fn test_merge_either_order() {
        let low = Block::free(0, 100);
        let high = Block::free(100, 50);
        let m1 = low.merge(&high).unwrap();
        let m2 = high.merge(&low).unwrap();
        assert_eq!(m1, m2);
        assert_eq!(m1.range(), (0, 150));
        assert!(m1.is_free());
    }

    #[test]
    fn test_merge_rejects_gap_and_used() {
        let a = Block::free(0, 10);
        assert!(matches!(
            a.merge(&Block::free(11, 5)),
            Err(BlockError::NotAdjacent { .. })
        ));
        assert!(matches!(
            a.merge(&Block::used(BlockId(1), 10, 5)),
            Err(BlockError::NotFree { .. })
        ));
    }

    #[test]
    fn test_split_off() {
        let b = Block::free(20, 50);
        let (used, rest) = b.split_off(BlockId(1), 30).unwrap();
        assert_eq!(used, Block::used(BlockId(1), 20, 30));
        assert_eq!(rest, Some(Block::free(50, 20)));

        let (exact, none) = b.split_off(BlockId(2), 50).unwrap();
        assert_eq!(exact.size(), 50);
        assert!(none.is_none());

        assert!(matches!(
            b.split_off(BlockId(3), 51),
            Err(BlockError::SplitTooLarge { requested: 51, available: 50 })
        ));
    }

    #[test]
    fn test_as_free_keeps_range() {
        let b = Block::used(BlockId(9), 4, 6).as_free();
        assert!(b.is_free());
        assert_eq!(b.range(), (4, 10));
    }

    #[test]
    fn test_display() {
        assert_eq!(Block::free(30, 70).to_string(), "30;100");
        assert_eq!(Block::used(BlockId(2), 0, 30).to_string(), "2;0;30");
    }

    #[test]
    fn test_serde_roundtrip() {
        let b = Block::used(BlockId(4), 8, 16);
        let json = serde_json::to_string(&b).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }
}
