// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Best-fit placement.
//!
//! Takes the smallest free block that is still large enough, leaving the
//! smallest possible remainder behind.

use crate::strategy::{select_extreme, FitStrategy};
use crate::FitError;
use block_core::{BlockList, Size};

/// Smallest block with `size >= requested`; earliest wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

impl BestFit {
    pub fn new() -> Self {
        Self
    }
}

impl FitStrategy for BestFit {
    fn name(&self) -> &str {
        "best-fit"
    }

    fn select(&self, requested: Size, free: &BlockList) -> Result<usize, FitError> {
        select_extreme(requested, free, |candidate, best| candidate < best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_core::Block;

    fn free_list(sizes: &[Size]) -> BlockList {
        let mut start = 0;
        sizes
            .iter()
            .map(|&s| {
                let b = Block::free(start, s);
                start += s + 1;
                b
            })
            .collect()
    }

    #[test]
    fn test_smallest_sufficient_wins() {
        let free = free_list(&[10, 30, 20]);
        assert_eq!(BestFit::new().select(15, &free), Ok(2));
    }

    #[test]
    fn test_tie_keeps_first() {
        let free = free_list(&[40, 20, 20, 30]);
        assert_eq!(BestFit::new().select(15, &free), Ok(1));
    }

    #[test]
    fn test_skips_too_small() {
        let free = free_list(&[5, 8, 100]);
        assert_eq!(BestFit::new().select(9, &free), Ok(2));
    }

    #[test]
    fn test_no_fit() {
        let free = free_list(&[10, 30, 20]);
        assert_eq!(
            BestFit::new().select(31, &free),
            Err(FitError::NoFit { requested: 31 })
        );
    }
}
