// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time snapshots of an arena.
//!
//! The text form of an [`ArenaReport`] is the trace output format:
//!
//! ```text
//! Size:
//! 1000
//! Used Blocks:
//! 0;0;100
//! 3;100;300
//! Free Blocks:
//! 300;1000
//! Fragmentation:
//! 0.000000
//! Errors:
//! None
//! ```
//!
//! Used blocks are listed by id, free blocks by start address, and block
//! ends are exclusive.

use crate::ErrorRecord;
use block_core::{Block, Size};
use std::fmt;

/// A self-contained snapshot of one arena.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ArenaReport {
    /// Arena capacity.
    pub capacity: Size,
    /// Used blocks, sorted by id.
    pub used: Vec<Block>,
    /// Free blocks, sorted by start address.
    pub free: Vec<Block>,
    /// Fragmentation at snapshot time.
    pub fragmentation: f64,
    /// The error log at snapshot time.
    pub errors: Vec<ErrorRecord>,
    /// Instruction counter at snapshot time.
    pub instruction: u64,
}

impl ArenaReport {
    /// Total free space in the snapshot.
    pub fn free_size(&self) -> Size {
        self.free.iter().map(Block::size).sum()
    }

    /// Total used space in the snapshot.
    pub fn used_size(&self) -> Size {
        self.used.iter().map(Block::size).sum()
    }

    /// Renders the address space as a bar of `width` cells: `#` where any
    /// used block touches the cell, `.` elsewhere.
    pub fn occupancy_bar(&self, width: usize) -> String {
        let width = width.max(1) as u128;
        let capacity = u128::from(self.capacity);
        // Cell bounds never exceed capacity, so narrowing back is lossless.
        let at = |cell: u128| (cell * capacity / width) as Size;
        (0..width)
            .map(|cell| {
                let lo = at(cell);
                let hi = at(cell + 1).max(lo + 1);
                let probe = Block::free(lo, hi - lo);
                if self.used.iter().any(|b| b.overlaps(&probe)) {
                    '#'
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl fmt::Display for ArenaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size:")?;
        writeln!(f, "{}", self.capacity)?;
        writeln!(f, "Used Blocks:")?;
        for block in &self.used {
            writeln!(f, "{block}")?;
        }
        writeln!(f, "Free Blocks:")?;
        for block in &self.free {
            writeln!(f, "{block}")?;
        }
        writeln!(f, "Fragmentation:")?;
        writeln!(f, "{:.6}", self.fragmentation)?;
        writeln!(f, "Errors:")?;
        if self.errors.is_empty() {
            writeln!(f, "None")?;
        }
        for err in &self.errors {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeallocReason;
    use block_core::BlockId;

    #[test]
    fn test_format_without_errors() {
        let report = ArenaReport {
            capacity: 100,
            used: vec![Block::used(BlockId(1), 0, 40)],
            free: vec![Block::free(40, 60)],
            fragmentation: 0.0,
            errors: vec![],
            instruction: 1,
        };
        let expected = "Size:\n100\nUsed Blocks:\n1;0;40\nFree Blocks:\n40;100\n\
                        Fragmentation:\n0.000000\nErrors:\nNone\n";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_format_with_errors() {
        let report = ArenaReport {
            capacity: 10,
            used: vec![],
            free: vec![Block::free(0, 4), Block::free(6, 4)],
            fragmentation: 0.5,
            errors: vec![
                ErrorRecord::alloc_failure(BlockId(7), 2, 9, 4),
                ErrorRecord::dealloc_failure(BlockId(8), 3, DeallocReason::NeverAllocated),
            ],
            instruction: 3,
        };
        let text = report.to_string();
        assert!(text.ends_with("Fragmentation:\n0.500000\nErrors:\nA;2;4\nD;3;0\n"));
        assert!(!text.contains("None"));
    }

    #[test]
    fn test_sizes() {
        let report = ArenaReport {
            capacity: 30,
            used: vec![Block::used(BlockId(1), 0, 10)],
            free: vec![Block::free(10, 5), Block::free(15, 15)],
            fragmentation: 0.25,
            errors: vec![],
            instruction: 0,
        };
        assert_eq!(report.used_size(), 10);
        assert_eq!(report.free_size(), 20);
    }

    #[test]
    fn test_occupancy_bar() {
        let report = ArenaReport {
            capacity: 100,
            used: vec![Block::used(BlockId(1), 0, 50)],
            free: vec![Block::free(50, 50)],
            fragmentation: 0.0,
            errors: vec![],
            instruction: 1,
        };
        assert_eq!(report.occupancy_bar(10), "#####.....");
        assert_eq!(report.occupancy_bar(0), "#");
        // Cells narrower than one unit still map to an address.
        assert_eq!(report.occupancy_bar(200).len(), 200);
    }

    #[test]
    fn test_occupancy_bar_huge_capacity() {
        let report = ArenaReport {
            capacity: u64::MAX,
            used: vec![Block::used(BlockId(1), 0, 10)],
            free: vec![Block::free(10, u64::MAX - 10)],
            fragmentation: 0.0,
            errors: vec![],
            instruction: 1,
        };
        let bar = report.occupancy_bar(60);
        assert_eq!(bar.len(), 60);
        assert!(bar.starts_with("#."));
        assert_eq!(bar.matches('#').count(), 1);

        let half = ArenaReport {
            capacity: 1_000_000_000_000_000_000,
            used: vec![Block::used(BlockId(2), 500_000_000_000_000_000, 500_000_000_000_000_000)],
            free: vec![Block::free(0, 500_000_000_000_000_000)],
            ..report
        };
        assert_eq!(half.occupancy_bar(4), "..##");
    }
}
