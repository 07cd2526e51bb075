// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`FitStrategy`] trait and strategy implementations.

pub mod best_fit;
pub mod first_fit;
pub mod worst_fit;

use crate::FitError;
use block_core::{BlockList, Size};

/// Trait for block placement strategies.
///
/// Each strategy takes a requested size and the arena's free list and
/// returns the index of the free block that should satisfy the request.
///
/// Strategies are stateless: one value can serve any number of independent
/// arenas.
pub trait FitStrategy: Send + Sync {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Selects a free block for `requested` units.
    fn select(&self, requested: Size, free: &BlockList) -> Result<usize, FitError>;
}

/// Scans `free` for blocks of at least `requested` units and keeps the one
/// for which `prefer(candidate, current)` holds. Strict comparisons keep the
/// earliest block on ties.
pub(crate) fn select_extreme(
    requested: Size,
    free: &BlockList,
    prefer: impl Fn(Size, Size) -> bool,
) -> Result<usize, FitError> {
    let mut chosen: Option<(usize, Size)> = None;

    for (i, block) in free.iter().enumerate() {
        let size = block.size();
        if size < requested {
            continue;
        }
        match chosen {
            Some((_, best)) if !prefer(size, best) => {}
            _ => chosen = Some((i, size)),
        }
    }

    chosen
        .map(|(i, _)| i)
        .ok_or(FitError::NoFit { requested })
}
