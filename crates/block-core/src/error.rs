// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for block construction and manipulation.

use crate::{Address, Size};

/// Errors that can occur when building, splitting or merging blocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// The range end lies before its start.
    #[error("invalid range: end {end} is before start {start}")]
    InvalidRange { start: Address, end: Address },

    /// Two blocks were merged that do not touch at a boundary.
    #[error("cannot merge non-adjacent blocks [{a_start}, {a_end}) and [{b_start}, {b_end})")]
    NotAdjacent {
        a_start: Address,
        a_end: Address,
        b_start: Address,
        b_end: Address,
    },

    /// An operation that requires a free block was given a used one.
    #[error("block [{start}, {end}) is not free")]
    NotFree { start: Address, end: Address },

    /// A split asked for more space than the block holds.
    #[error("cannot take {requested} units from a block of {available}")]
    SplitTooLarge { requested: Size, available: Size },
}
