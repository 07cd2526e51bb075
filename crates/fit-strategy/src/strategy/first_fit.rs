// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! First-fit placement.
//!
//! Takes the first free block, in current list order, that is large enough.
//! The result therefore depends on the order in which blocks were added to
//! and removed from the free list; that history dependence is part of the
//! model and is what makes first-fit traces reproducible.

use crate::strategy::FitStrategy;
use crate::FitError;
use block_core::{BlockList, Size};

/// First block with `size >= requested`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl FirstFit {
    pub fn new() -> Self {
        Self
    }
}

impl FitStrategy for FirstFit {
    fn name(&self) -> &str {
        "first-fit"
    }

    fn select(&self, requested: Size, free: &BlockList) -> Result<usize, FitError> {
        free.iter()
            .position(|b| b.size() >= requested)
            .ok_or(FitError::NoFit { requested })
    }
}
