// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Entries of the arena's append-only error log.

use block_core::{BlockId, Size};
use std::fmt;

/// Why a deallocation could not be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeallocReason {
    /// The id is not known to have been allocated.
    NeverAllocated,
    /// The id is believed to have been allocated and released already.
    AlreadyFreed,
}

impl DeallocReason {
    /// Numeric code used in the text report (`0` / `1`).
    pub fn code(self) -> u8 {
        match self {
            DeallocReason::NeverAllocated => 0,
            DeallocReason::AlreadyFreed => 1,
        }
    }
}

/// The kind of a recorded failure, with its diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ErrorKind {
    /// No free block could satisfy the request.
    AllocFailure {
        requested: Size,
        /// Size of the largest free block at the time of the failure.
        largest_free: Size,
    },
    /// The id was not currently allocated.
    DeallocFailure { reason: DeallocReason },
}

/// One recorded allocation or deallocation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorRecord {
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub block_id: BlockId,
    /// Instruction counter value when the failure happened.
    pub instruction: u64,
}

impl ErrorRecord {
    pub fn alloc_failure(id: BlockId, instruction: u64, requested: Size, largest_free: Size) -> Self {
        Self {
            kind: ErrorKind::AllocFailure {
                requested,
                largest_free,
            },
            block_id: id,
            instruction,
        }
    }

    pub fn dealloc_failure(id: BlockId, instruction: u64, reason: DeallocReason) -> Self {
        Self {
            kind: ErrorKind::DeallocFailure { reason },
            block_id: id,
            instruction,
        }
    }

    /// Returns `true` for an allocation failure of `id`.
    pub fn is_alloc_failure_of(&self, id: BlockId) -> bool {
        self.block_id == id && matches!(self.kind, ErrorKind::AllocFailure { .. })
    }

    /// Report opcode: `A` or `D`.
    pub fn op(&self) -> char {
        match self.kind {
            ErrorKind::AllocFailure { .. } => 'A',
            ErrorKind::DeallocFailure { .. } => 'D',
        }
    }

    /// Report parameter: the largest free size, or the dealloc reason code.
    pub fn param(&self) -> u64 {
        match self.kind {
            ErrorKind::AllocFailure { largest_free, .. } => largest_free,
            ErrorKind::DeallocFailure { reason } => u64::from(reason.code()),
        }
    }
}

/// Report form: `<op>;<instruction>;<param>`.
impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{}", self.op(), self.instruction, self.param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_display() {
        let r = ErrorRecord::alloc_failure(BlockId(4), 7, 300, 120);
        assert_eq!(r.to_string(), "A;7;120");
        assert!(r.is_alloc_failure_of(BlockId(4)));
        assert!(!r.is_alloc_failure_of(BlockId(5)));
    }

    #[test]
    fn test_dealloc_display() {
        let never = ErrorRecord::dealloc_failure(BlockId(1), 3, DeallocReason::NeverAllocated);
        let freed = ErrorRecord::dealloc_failure(BlockId(1), 9, DeallocReason::AlreadyFreed);
        assert_eq!(never.to_string(), "D;3;0");
        assert_eq!(freed.to_string(), "D;9;1");
        assert!(!never.is_alloc_failure_of(BlockId(1)));
    }

    #[test]
    fn test_json_shape() {
        let r = ErrorRecord::dealloc_failure(BlockId(2), 5, DeallocReason::AlreadyFreed);
        let v: serde_json::Value = serde_json::to_value(r).unwrap();
        assert_eq!(v["kind"], "dealloc-failure");
        assert_eq!(v["reason"], "already-freed");
        assert_eq!(v["block_id"], 2);
        assert_eq!(v["instruction"], 5);
    }
}
