// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The simulated address space and its state transitions.
//!
//! A [`MemoryArena`] owns one free list and one used list whose blocks
//! always tile `[0, capacity)` exactly:
//!
//! ```text
//!  0                                                     capacity
//!  |-- used 0 --|---- free ----|-- used 3 --|------ free ------|
//! ```
//!
//! It changes only through [`MemoryArena::allocate`],
//! [`MemoryArena::deallocate`] and [`MemoryArena::compact`]. Failed
//! requests are appended to the error log and leave the blocks untouched;
//! no operation ever aborts.

use crate::{
    ArenaError, ArenaOptions, ArenaReport, ArenaStats, CoalescePolicy, DeallocDiagnostics,
    DeallocReason, ErrorRecord,
};
use block_core::{Block, BlockId, BlockList, Size};
use fit_strategy::FitStrategy;
use std::collections::HashSet;

/// A fixed-size simulated address space.
///
/// # Example
/// ```
/// use block_core::BlockId;
/// use fit_strategy::Placement;
/// use memory_arena::MemoryArena;
///
/// let mut arena = MemoryArena::new(20).unwrap();
/// arena.allocate(10, BlockId(1), &Placement::FirstFit).unwrap();
/// arena.allocate(10, BlockId(2), &Placement::FirstFit).unwrap();
/// assert_eq!(arena.fragmentation(), 0.0);
///
/// arena.deallocate(BlockId(1)).unwrap();
/// arena.deallocate(BlockId(2)).unwrap();
/// arena.compact();
/// assert_eq!(arena.free_blocks().len(), 1);
/// assert_eq!(arena.free_blocks().get(0).unwrap().range(), (0, 20));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryArena {
    capacity: Size,
    free: BlockList,
    used: BlockList,
    instructions: u64,
    outputs: u64,
    errors: Vec<ErrorRecord>,
    options: ArenaOptions,
    /// Ids that were successfully allocated at least once.
    ever_allocated: HashSet<BlockId>,
    stats: ArenaStats,
}

impl MemoryArena {
    /// Creates an arena of `capacity` units with default options.
    pub fn new(capacity: Size) -> Result<Self, ArenaError> {
        Self::with_options(capacity, ArenaOptions::default())
    }

    /// Creates an arena whose whole range is a single free block.
    pub fn with_options(capacity: Size, options: ArenaOptions) -> Result<Self, ArenaError> {
        if capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            free: BlockList::with_block(Block::free(0, capacity)),
            used: BlockList::new(),
            instructions: 0,
            outputs: 0,
            errors: Vec::new(),
            options,
            ever_allocated: HashSet::new(),
            stats: ArenaStats::default(),
        })
    }

    // ── Transitions ────────────────────────────────────────────

    /// Advances the instruction counter and returns its new value.
    ///
    /// The command loop calls this once per command, before applying it, so
    /// the first command of a trace is instruction 1.
    pub fn begin_instruction(&mut self) -> u64 {
        self.instructions += 1;
        self.instructions
    }

    /// Allocates `size` units for `id`, letting `strategy` pick the free block.
    ///
    /// On success the chosen free block is split: the front becomes the used
    /// block (returned), the remainder (if any) goes back on the free list.
    ///
    /// On failure an allocation failure carrying the size of the largest free
    /// block is appended to the error log and also returned; the blocks are
    /// unchanged. Zero-sized requests and requests for an id that is
    /// currently allocated are refused the same way.
    pub fn allocate(
        &mut self,
        size: Size,
        id: BlockId,
        strategy: &dyn FitStrategy,
    ) -> Result<Block, ErrorRecord> {
        if size == 0 || self.used.position_of_owner(id).is_some() {
            tracing::debug!(%id, size, "refusing zero-sized or duplicate allocation");
            return Err(self.fail_allocation(id, size));
        }

        let index = match strategy.select(size, &self.free) {
            Ok(index) => index,
            Err(e) => {
                tracing::debug!(%id, strategy = strategy.name(), "{e}");
                return Err(self.fail_allocation(id, size));
            }
        };

        let Some(chosen) = self.free.remove_at(index) else {
            return Err(self.fail_allocation(id, size));
        };
        let (used, rest) = match chosen.split_off(id, size) {
            Ok(parts) => parts,
            Err(e) => {
                // A strategy returned a block that cannot hold the request.
                tracing::warn!(strategy = strategy.name(), "rejected selection: {e}");
                self.free.add(chosen);
                return Err(self.fail_allocation(id, size));
            }
        };

        if let Some(rest) = rest {
            self.free.add(rest);
        }
        self.used.add(used);
        self.ever_allocated.insert(id);
        self.stats.record_allocation(size, self.used.total_size());

        tracing::debug!(%id, start = used.start(), end = used.end(), "allocated");
        Ok(used)
    }

    /// Releases the block owned by `id` and coalesces it into the free list.
    ///
    /// Returns the resulting free block (after any merge). If `id` is not
    /// currently allocated, a deallocation failure is logged and returned.
    pub fn deallocate(&mut self, id: BlockId) -> Result<Block, ErrorRecord> {
        let Some(block) = self
            .used
            .position_of_owner(id)
            .and_then(|i| self.used.remove_at(i))
        else {
            let reason = self.dealloc_reason(id);
            let record = ErrorRecord::dealloc_failure(id, self.instructions, reason);
            tracing::debug!(%id, ?reason, "deallocation failed");
            self.errors.push(record);
            self.stats.record_dealloc_failure();
            return Err(record);
        };

        let mut released = block.as_free();
        let mut merges = 0;
        while let Some(j) = self.free.iter().position(|b| b.is_adjacent(&released)) {
            let Some(neighbour) = self.free.remove_at(j) else {
                break;
            };
            match released.merge(&neighbour) {
                Ok(merged) => released = merged,
                Err(_) => {
                    self.free.add(neighbour);
                    break;
                }
            }
            merges += 1;
            if self.options.coalesce == CoalescePolicy::SingleSided {
                break;
            }
        }

        self.free.add(released);
        self.stats.record_deallocation(merges);
        tracing::debug!(%id, merges, start = released.start(), end = released.end(), "released");
        Ok(released)
    }

    /// Merges every pair of directly adjacent free blocks.
    ///
    /// Used blocks are not moved; only the free-list metadata changes.
    /// Afterwards no two free blocks touch. Returns the number of merges.
    pub fn compact(&mut self) -> usize {
        let mut merges = 0;
        let mut i = 0;

        while let Some(&current) = self.free.get(i) {
            let successor = self
                .free
                .iter()
                .position(|b| current.end() == b.start());

            let Some(j) = successor else {
                i += 1;
                continue;
            };
            let Some(next) = self.free.remove_at(j) else {
                break;
            };
            if j < i {
                i -= 1;
            }
            match current.merge(&next) {
                Ok(merged) => {
                    self.free.replace_at(i, merged);
                    merges += 1;
                }
                Err(_) => {
                    self.free.add(next);
                    i += 1;
                }
            }
        }

        self.stats.record_compaction(merges as u64);
        tracing::debug!(merges, free_blocks = self.free.len(), "compacted");
        merges
    }

    // ── Reporting ──────────────────────────────────────────────

    /// `1 - largest_free / total_free`, or `0.0` when nothing is free.
    pub fn fragmentation(&self) -> f64 {
        let total = self.free.total_size();
        if total == 0 {
            return 0.0;
        }
        let largest = self.free.largest_size();
        (1.0 - largest as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// A snapshot of the current state. Does not mutate anything.
    pub fn report(&self) -> ArenaReport {
        ArenaReport {
            capacity: self.capacity,
            used: self.used.sorted_by_owner(),
            free: self.free.sorted_by_start(),
            fragmentation: self.fragmentation(),
            errors: self.errors.clone(),
            instruction: self.instructions,
        }
    }

    /// Takes a snapshot for an output request and bumps the output counter.
    pub fn output(&mut self) -> ArenaReport {
        let report = self.report();
        self.outputs += 1;
        report
    }

    /// Checks that the blocks tile `[0, capacity)` exactly, without overlap,
    /// each in the right list.
    pub fn verify(&self) -> Result<(), ArenaError> {
        for b in &self.free {
            if !b.is_free() {
                return Err(ArenaError::Misfiled(*b));
            }
        }
        for b in &self.used {
            if b.is_free() {
                return Err(ArenaError::Misfiled(*b));
            }
        }

        let mut all: Vec<Block> = self.free.iter().chain(self.used.iter()).copied().collect();
        all.sort_by_key(|b| (b.start(), b.end()));

        for pair in all.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(ArenaError::Overlap {
                    a: pair[0],
                    b: pair[1],
                });
            }
        }
        if let Some(last) = all.iter().find(|b| b.end() > self.capacity) {
            return Err(ArenaError::OutOfBounds {
                block: *last,
                capacity: self.capacity,
            });
        }

        let covered: Size = all.iter().map(Block::size).sum();
        if covered != self.capacity {
            return Err(ArenaError::Coverage {
                covered,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn capacity(&self) -> Size {
        self.capacity
    }

    pub fn free_blocks(&self) -> &BlockList {
        &self.free
    }

    pub fn used_blocks(&self) -> &BlockList {
        &self.used
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }

    pub fn output_count(&self) -> u64 {
        self.outputs
    }

    pub fn options(&self) -> ArenaOptions {
        self.options
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    /// Total free space.
    pub fn free_size(&self) -> Size {
        self.free.total_size()
    }

    /// Total used space.
    pub fn used_size(&self) -> Size {
        self.used.total_size()
    }

    /// Size of the largest free block, or 0 if nothing is free.
    pub fn largest_free(&self) -> Size {
        self.free.largest_size()
    }

    /// Returns `true` if `id` currently owns a block.
    pub fn is_allocated(&self, id: BlockId) -> bool {
        self.used.position_of_owner(id).is_some()
    }

    // ── Internals ──────────────────────────────────────────────

    fn fail_allocation(&mut self, id: BlockId, size: Size) -> ErrorRecord {
        let record =
            ErrorRecord::alloc_failure(id, self.instructions, size, self.free.largest_size());
        self.errors.push(record);
        self.stats.record_alloc_failure();
        record
    }

    fn dealloc_reason(&self, id: BlockId) -> DeallocReason {
        let freed = match self.options.dealloc_diagnostics {
            DeallocDiagnostics::ErrorLog => self.errors.iter().any(|e| e.is_alloc_failure_of(id)),
            DeallocDiagnostics::History => self.ever_allocated.contains(&id),
        };
        if freed {
            DeallocReason::AlreadyFreed
        } else {
            DeallocReason::NeverAllocated
        }
    }
}
