// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # block-core
//!
//! Value types describing a simulated linear address space.
//!
//! This crate provides:
//! - [`Block`]: an immutable, contiguous address range `[start, end)` tagged
//!   with its [`Owner`] (free, or a used allocation identified by [`BlockId`]).
//! - [`BlockList`]: an unordered collection of non-overlapping blocks with
//!   index-based add/remove/lookup.
//!
//! All ranges use **exclusive ends**: a block of size `n` starting at `s`
//! covers `s..s + n`, and two blocks are adjacent when one's `end` equals
//! the other's `start`.
//!
//! Nothing in this crate touches real memory; addresses are plain offsets.
//!
//! # Example
//! ```
//! use block_core::{Block, BlockId, BlockList};
//!
//! let mut free = BlockList::with_block(Block::free(0, 100));
//! let whole = free.remove_at(0).unwrap();
//! let (used, rest) = whole.split_off(BlockId(7), 30).unwrap();
//! assert_eq!(used.range(), (0, 30));
//! assert_eq!(rest.unwrap().range(), (30, 100));
//! ```

mod block;
mod block_list;
mod error;

pub use block::{Address, Block, BlockId, Owner, Size};
pub use block_list::BlockList;
pub use error::BlockError;
