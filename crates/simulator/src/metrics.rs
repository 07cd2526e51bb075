// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Side-by-side metrics for comparing placements on the same trace.

use crate::RunOutcome;
use block_core::Size;
use fit_strategy::Placement;
use std::fmt::Write as _;
use std::time::Duration;

/// The numbers that matter when comparing one run against another.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunMetrics {
    pub placement: Placement,
    pub fragmentation: f64,
    pub free_blocks: usize,
    pub used_blocks: usize,
    pub free_size: Size,
    pub largest_free: Size,
    pub alloc_failures: u64,
    pub dealloc_failures: u64,
    pub peak_used: Size,
    pub elapsed: Duration,
}

impl From<&RunOutcome> for RunMetrics {
    fn from(outcome: &RunOutcome) -> Self {
        let report = &outcome.report;
        Self {
            placement: outcome.placement,
            fragmentation: report.fragmentation,
            free_blocks: report.free.len(),
            used_blocks: report.used.len(),
            free_size: report.free_size(),
            largest_free: report.free.iter().map(|b| b.size()).max().unwrap_or(0),
            alloc_failures: outcome.stats.alloc_failures,
            dealloc_failures: outcome.stats.dealloc_failures,
            peak_used: outcome.stats.peak_used,
            elapsed: outcome.elapsed,
        }
    }
}

/// Metrics for several runs of the same trace.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Comparison {
    pub rows: Vec<RunMetrics>,
}

impl Comparison {
    pub fn new(outcomes: &[RunOutcome]) -> Self {
        Self {
            rows: outcomes.iter().map(RunMetrics::from).collect(),
        }
    }

    /// The run with the fewest allocation failures, then the lowest
    /// final fragmentation. The earliest row wins a full tie.
    pub fn best(&self) -> Option<&RunMetrics> {
        self.rows.iter().reduce(|best, row| {
            let key = |m: &RunMetrics| (m.alloc_failures, m.fragmentation);
            if key(row) < key(best) {
                row
            } else {
                best
            }
        })
    }

    /// Renders the rows as a fixed-width text table.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:>14} {:>6} {:>6} {:>10} {:>10} {:>8} {:>8} {:>10}",
            "Strategy", "Fragmentation", "Free", "Used", "FreeSize", "Largest", "A-fail", "D-fail",
            "PeakUsed",
        );
        let _ = writeln!(out, "{}", "-".repeat(92));
        for m in &self.rows {
            let _ = writeln!(
                out,
                "{:<10} {:>14.6} {:>6} {:>6} {:>10} {:>10} {:>8} {:>8} {:>10}",
                m.placement.as_str(),
                m.fragmentation,
                m.free_blocks,
                m.used_blocks,
                m.free_size,
                m.largest_free,
                m.alloc_failures,
                m.dealloc_failures,
                m.peak_used,
            );
        }
        out
    }
}
