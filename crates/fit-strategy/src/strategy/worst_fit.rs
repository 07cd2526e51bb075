// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Worst-fit placement.
//!
//! Takes the largest free block, so that the remainder left after the split
//! stays as large as possible.

use crate::strategy::{select_extreme, FitStrategy};
use crate::FitError;
use block_core::{BlockList, Size};

/// Largest block with `size >= requested`; earliest wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl WorstFit {
    pub fn new() -> Self {
        Self
    }
}

impl FitStrategy for WorstFit {
    fn name(&self) -> &str {
        "worst-fit"
    }

    fn select(&self, requested: Size, free: &BlockList) -> Result<usize, FitError> {
        select_extreme(requested, free, |candidate, best| candidate > best)
    }
}
