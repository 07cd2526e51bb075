// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Arena statistics for comparing placement strategies.
//!
//! [`ArenaStats`] tracks cumulative counters about how an arena was driven:
//! how many requests succeeded or failed, how often freed blocks were
//! coalesced, and the high-water mark of used space.

use block_core::Size;

/// Cumulative statistics about one arena's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ArenaStats {
    /// Successful allocations.
    pub allocations: u64,
    /// Allocation requests that were refused.
    pub alloc_failures: u64,
    /// Successful deallocations.
    pub deallocations: u64,
    /// Deallocation requests for ids that were not allocated.
    pub dealloc_failures: u64,
    /// Merges performed while releasing blocks.
    pub coalesces: u64,
    /// Number of compaction passes.
    pub compactions: u64,
    /// Merges performed by compaction.
    pub compaction_merges: u64,
    /// Highest amount of simultaneously used space.
    pub peak_used: Size,
    /// Total space ever handed out, saturating at `Size::MAX`.
    pub cumulative_allocated: Size,
}

impl ArenaStats {
    /// Fraction of allocation requests that succeeded, in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` if no allocation was attempted.
    pub fn success_ratio(&self) -> f64 {
        let total = self.allocations.saturating_add(self.alloc_failures);
        if total == 0 {
            return 0.0;
        }
        self.allocations as f64 / total as f64
    }

    pub(crate) fn record_allocation(&mut self, size: Size, used_now: Size) {
        self.allocations = self.allocations.saturating_add(1);
        self.cumulative_allocated = self.cumulative_allocated.saturating_add(size);
        self.peak_used = self.peak_used.max(used_now);
    }

    pub(crate) fn record_alloc_failure(&mut self) {
        self.alloc_failures = self.alloc_failures.saturating_add(1);
    }

    pub(crate) fn record_deallocation(&mut self, merges: u64) {
        self.deallocations = self.deallocations.saturating_add(1);
        self.coalesces = self.coalesces.saturating_add(merges);
    }

    pub(crate) fn record_dealloc_failure(&mut self) {
        self.dealloc_failures = self.dealloc_failures.saturating_add(1);
    }

    pub(crate) fn record_compaction(&mut self, merges: u64) {
        self.compactions = self.compactions.saturating_add(1);
        self.compaction_merges = self.compaction_merges.saturating_add(merges);
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Allocations: {} ok, {} failed ({:.0}% success), \
             {} deallocations ({} failed, {} merges), \
             {} compactions ({} merges), peak used {}",
            self.allocations,
            self.alloc_failures,
            self.success_ratio() * 100.0,
            self.deallocations,
            self.dealloc_failures,
            self.coalesces,
            self.compactions,
            self.compaction_merges,
            self.peak_used,
        )
    }
}
