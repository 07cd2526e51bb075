// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Trace commands and their one-line text form.
//!
//! | Line        | Command                         |
//! |-------------|---------------------------------|
//! | `A;<id>;<n>`| [`Command::Allocate`]           |
//! | `D;<id>`    | [`Command::Deallocate`]         |
//! | `C`         | [`Command::Compact`]            |
//! | anything else | [`Command::Output`] (written as `O`) |

use crate::TraceError;
use block_core::{BlockId, Size};

/// The kind of a command, without its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Allocate,
    Deallocate,
    Compact,
    Output,
}

impl CommandKind {
    /// One-letter opcode used in trace files.
    pub fn opcode(self) -> char {
        match self {
            Self::Allocate => 'A',
            Self::Deallocate => 'D',
            Self::Compact => 'C',
            Self::Output => 'O',
        }
    }
}

/// One step of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Allocate `size` units for `id`.
    Allocate { id: BlockId, size: Size },
    /// Release the block owned by `id`.
    Deallocate { id: BlockId },
    /// Merge adjacent free blocks.
    Compact,
    /// Take a snapshot of the arena.
    Output,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Allocate { .. } => CommandKind::Allocate,
            Self::Deallocate { .. } => CommandKind::Deallocate,
            Self::Compact => CommandKind::Compact,
            Self::Output => CommandKind::Output,
        }
    }

    /// The block id operand, if the command has one.
    pub fn id(&self) -> Option<BlockId> {
        match *self {
            Self::Allocate { id, .. } | Self::Deallocate { id } => Some(id),
            Self::Compact | Self::Output => None,
        }
    }

    /// The size operand, if the command has one.
    pub fn size(&self) -> Option<Size> {
        match *self {
            Self::Allocate { size, .. } => Some(size),
            _ => None,
        }
    }

    /// Parses one trimmed, non-empty trace line.
    ///
    /// `line` is the 1-based line number used in error messages.
    pub fn parse_line(text: &str, line: usize) -> Result<Self, TraceError> {
        let fields: Vec<&str> = text.split(';').map(str::trim).collect();
        let malformed = |detail| TraceError::Malformed {
            line,
            content: text.to_string(),
            detail,
        };

        match fields[0] {
            "A" => match fields[..] {
                [_, id, size] => Ok(Self::Allocate {
                    id: BlockId(parse_number(id, "block id", line)?),
                    size: parse_number(size, "size", line)?,
                }),
                _ => Err(malformed("expected A;<id>;<size>")),
            },
            "D" => match fields[..] {
                [_, id] => Ok(Self::Deallocate {
                    id: BlockId(parse_number(id, "block id", line)?),
                }),
                _ => Err(malformed("expected D;<id>")),
            },
            "C" if fields.len() == 1 => Ok(Self::Compact),
            "C" => Err(malformed("compact takes no operands")),
            _ => Ok(Self::Output),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allocate { id, size } => write!(f, "A;{id};{size}"),
            Self::Deallocate { id } => write!(f, "D;{id}"),
            Self::Compact => f.write_str("C"),
            Self::Output => f.write_str("O"),
        }
    }
}

pub(crate) fn parse_number(value: &str, field: &'static str, line: usize) -> Result<u64, TraceError> {
    value.parse().map_err(|_| TraceError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
