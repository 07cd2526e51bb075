// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for arena construction, options and integrity checks.
//!
//! Allocation and deallocation failures are *not* errors in this sense:
//! they are recorded in the arena's error log (see [`crate::ErrorRecord`])
//! and the run continues.

use block_core::{Block, Size};

/// Errors that can occur when creating or verifying an arena.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// An arena must cover at least one address.
    #[error("cannot create an arena with zero capacity")]
    ZeroCapacity,

    /// Two blocks share at least one address.
    #[error("blocks {a:?} and {b:?} overlap")]
    Overlap { a: Block, b: Block },

    /// The blocks do not add up to the arena capacity.
    #[error("blocks cover {covered} units, but the arena holds {capacity}")]
    Coverage { covered: Size, capacity: Size },

    /// A block extends past the end of the arena.
    #[error("block {block:?} extends past the arena end {capacity}")]
    OutOfBounds { block: Block, capacity: Size },

    /// A block sits in the wrong list (a used block on the free list or vice versa).
    #[error("block {0:?} is in the wrong list")]
    Misfiled(Block),

    /// An option name was not recognised.
    #[error("unknown {option} '{value}'")]
    UnknownOption { option: &'static str, value: String },
}
