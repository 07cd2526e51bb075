// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Whole traces: a capacity line followed by commands.
//!
//! # Format
//! ```text
//! 1000        <- arena capacity
//! A;0;100     <- allocate 100 units for block 0
//! A;1;200
//! D;0         <- release block 0
//! C           <- compact
//! O           <- output a snapshot
//! ```
//!
//! Blank lines and lines starting with `#` are ignored everywhere.

use crate::command::parse_number;
use crate::{Command, CommandKind, TraceError};
use block_core::{BlockId, Size};
use std::collections::HashSet;
use std::path::Path;

/// A parsed command trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trace {
    /// Arena capacity.
    pub capacity: Size,
    /// Commands in execution order.
    pub commands: Vec<Command>,
}

impl Trace {
    pub fn new(capacity: Size, commands: Vec<Command>) -> Self {
        Self { capacity, commands }
    }

    /// Parses a trace from its text form.
    pub fn parse(text: &str) -> Result<Self, TraceError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let (line, first) = lines.next().ok_or(TraceError::MissingCapacity)?;
        let capacity = parse_number(first, "capacity", line)?;

        let commands = lines
            .map(|(line, l)| Command::parse_line(l, line))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { capacity, commands })
    }

    /// Reads and parses a trace file.
    pub fn from_file(path: &Path) -> Result<Self, TraceError> {
        let content = std::fs::read_to_string(path)?;
        let trace = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            capacity = trace.capacity,
            commands = trace.commands.len(),
            "loaded trace"
        );
        Ok(trace)
    }

    /// Writes the trace in its text form.
    pub fn write_to_file(&self, path: &Path) -> Result<(), TraceError> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Counts and sizes of the commands, without running anything.
    pub fn stats(&self) -> TraceStats {
        let mut stats = TraceStats {
            capacity: self.capacity,
            ..Default::default()
        };
        let mut ids: HashSet<BlockId> = HashSet::new();

        for cmd in &self.commands {
            match cmd.kind() {
                CommandKind::Allocate => stats.allocations += 1,
                CommandKind::Deallocate => stats.deallocations += 1,
                CommandKind::Compact => stats.compactions += 1,
                CommandKind::Output => stats.outputs += 1,
            }
            if let Some(size) = cmd.size() {
                stats.total_requested = stats.total_requested.saturating_add(size);
                stats.largest_request = stats.largest_request.max(size);
            }
            if let Some(id) = cmd.id() {
                ids.insert(id);
            }
        }
        stats.distinct_ids = ids.len();
        stats
    }
}

impl std::str::FromStr for Trace {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.capacity)?;
        for cmd in &self.commands {
            writeln!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Summary of a trace's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TraceStats {
    pub capacity: Size,
    pub allocations: usize,
    pub deallocations: usize,
    pub compactions: usize,
    pub outputs: usize,
    /// Sum of all allocation sizes.
    pub total_requested: Size,
    pub largest_request: Size,
    /// Number of distinct block ids mentioned.
    pub distinct_ids: usize,
}

impl TraceStats {
    /// Total number of commands.
    pub fn commands(&self) -> usize {
        self.allocations + self.deallocations + self.compactions + self.outputs
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "capacity {} | {} commands ({} alloc, {} dealloc, {} compact, {} output) | \
             {} ids, {} units requested, largest {}",
            self.capacity,
            self.commands(),
            self.allocations,
            self.deallocations,
            self.compactions,
            self.outputs,
            self.distinct_ids,
            self.total_requested,
            self.largest_request,
        )
    }
}
