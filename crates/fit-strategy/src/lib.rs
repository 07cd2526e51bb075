// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # fit-strategy
//!
//! Chooses which free block should satisfy an allocation request.
//!
//! # Strategies
//!
//! | Strategy | Picks | Tie-break |
//! |---|---|---|
//! | [`FirstFit`] | first block with `size >= requested` | list order |
//! | [`BestFit`] | smallest block with `size >= requested` | first in list order |
//! | [`WorstFit`] | largest block with `size >= requested` | first in list order |
//!
//! All strategies are pure: they read the free list and return an index,
//! or a uniform [`FitError::NoFit`] with no side effects.
//!
//! # Trait-Based Extensibility
//!
//! Strategies implement [`FitStrategy`], so the arena accepts any placement
//! policy without knowing about it:
//!
//! ```ignore
//! struct LastFit;
//! impl FitStrategy for LastFit {
//!     fn name(&self) -> &str { "last-fit" }
//!     fn select(&self, requested: Size, free: &BlockList) -> Result<usize, FitError> { /* ... */ }
//! }
//! ```
//!
//! [`Placement`] is the closed, serialisable enum over the three built-ins,
//! used by configuration and the CLI.
//!
//! # Example
//! ```
//! use block_core::{Block, BlockList};
//! use fit_strategy::{BestFit, FitStrategy, Placement};
//!
//! let free: BlockList = [Block::free(0, 10), Block::free(10, 30), Block::free(40, 20)]
//!     .into_iter()
//!     .collect();
//!
//! assert_eq!(BestFit::new().select(15, &free).unwrap(), 2);
//! assert_eq!("worst-fit".parse::<Placement>().unwrap().select(15, &free).unwrap(), 1);
//! ```

mod error;
mod placement;
pub mod strategy;

pub use error::FitError;
pub use placement::Placement;
pub use strategy::best_fit::BestFit;
pub use strategy::first_fit::FirstFit;
pub use strategy::worst_fit::WorstFit;
pub use strategy::FitStrategy;
