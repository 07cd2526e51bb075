// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memory-arena
//!
//! A simulated, fixed-size address space managed with an explicit free list
//! and used list.
//!
//! # Key Components
//!
//! - [`MemoryArena`]: the state machine. Allocation asks a
//!   [`fit_strategy::FitStrategy`] which free block to carve, deallocation
//!   merges the released block with one neighbour, and compaction merges
//!   every remaining adjacent free pair.
//! - [`ErrorRecord`]: an entry in the arena's append-only failure log.
//!   Failed requests never abort a run.
//! - [`ArenaReport`]: a snapshot whose `Display` is the trace output format.
//! - [`ArenaStats`]: cumulative counters used to compare strategies.
//! - [`ArenaOptions`]: knobs for coalescing and double-free diagnostics.
//!
//! # Lifecycle of a block
//!
//! ```text
//!  free [s, e)  ──allocate(n)──►  used(id) [s, s+n)  +  free [s+n, e)
//!                                      │
//!                                 deallocate(id)
//!                                      ▼
//!                 free [s, s+n)  ──merge with first neighbour──►  free list
//!                                      │
//!                                   compact()
//!                                      ▼
//!                     no two free blocks adjacent
//! ```
//!
//! # Example
//! ```
//! use block_core::BlockId;
//! use fit_strategy::Placement;
//! use memory_arena::MemoryArena;
//!
//! let mut arena = MemoryArena::new(1000).unwrap();
//! arena.allocate(100, BlockId(0), &Placement::BestFit).unwrap();
//! let err = arena.allocate(5000, BlockId(1), &Placement::BestFit).unwrap_err();
//!
//! // The failure is logged with the largest block that was available.
//! assert_eq!(err.to_string(), "A;0;900");
//! assert_eq!(arena.errors().len(), 1);
//! ```

mod arena;
mod error;
mod options;
mod record;
mod report;
mod stats;

pub use arena::MemoryArena;
pub use error::ArenaError;
pub use options::{ArenaOptions, CoalescePolicy, DeallocDiagnostics};
pub use record::{DeallocReason, ErrorKind, ErrorRecord};
pub use report::ArenaReport;
pub use stats::ArenaStats;
