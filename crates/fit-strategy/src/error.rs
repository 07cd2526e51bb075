// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for block placement.

use block_core::Size;

/// Errors that can occur while selecting a free block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// No free block is large enough. Every strategy reports this the same way.
    #[error("no free block large enough for {requested} units")]
    NoFit { requested: Size },

    /// A placement name could not be parsed.
    #[error("unknown placement '{0}'; expected 'first-fit', 'best-fit' or 'worst-fit'")]
    UnknownPlacement(String),
}
