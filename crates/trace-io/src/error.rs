// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for reading and writing command traces.

/// Errors that can occur when loading or saving a trace.
///
/// All of these are fatal to a run: a trace that cannot be read in full is
/// never partially replayed.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The trace file could not be read or written.
    #[error("trace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The trace has no capacity line.
    #[error("trace is empty: expected the arena capacity on the first line")]
    MissingCapacity,

    /// A numeric field could not be parsed.
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A command line has the wrong number of fields.
    #[error("line {line}: malformed command '{content}': {detail}")]
    Malformed {
        line: usize,
        content: String,
        detail: &'static str,
    },
}
