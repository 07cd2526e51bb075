// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The command loop that replays a trace against an arena.
//!
//! ```text
//! Trace ──► MemoryArena::new(capacity)
//!             │  for each command:
//!             │    begin_instruction()
//!             │    allocate / deallocate / compact / output
//!             │                                  └──► ReportSink
//!             ▼
//!         RunOutcome
//! ```
//!
//! Allocation and deallocation failures are logged by the arena and the
//! loop moves on. Only sink I/O can stop a run part-way.

use crate::{FileSink, NullSink, OutputPolicy, ReportSink, SimulatorConfig, SimulatorError};
use fit_strategy::{FitStrategy, Placement};
use memory_arena::{ArenaOptions, ArenaReport, ArenaStats, ErrorRecord, MemoryArena};
use std::time::{Duration, Instant};
use trace_io::{Command, Trace};

/// Stem used for snapshot files when the trace has no usable file name.
const DEFAULT_STEM: &str = "output";

/// The result of replaying one trace with one placement.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunOutcome {
    pub placement: Placement,
    /// State after the last command.
    pub report: ArenaReport,
    /// One snapshot per output command, in order.
    pub snapshots: Vec<ArenaReport>,
    pub stats: ArenaStats,
    /// Wall-clock time of the replay.
    pub elapsed: Duration,
}

impl RunOutcome {
    /// Every failure recorded during the run.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.report.errors
    }

    /// Returns a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{}: fragmentation {:.6}, {} free / {} used blocks, {} errors, {} snapshots",
            self.placement,
            self.report.fragmentation,
            self.report.free.len(),
            self.report.used.len(),
            self.report.errors.len(),
            self.snapshots.len(),
        )
    }
}

/// Replays traces. Each run gets its own fresh arena.
///
/// # Example
/// ```
/// use fit_strategy::Placement;
/// use simulator::CommandEngine;
/// use trace_io::Trace;
///
/// let trace: Trace = "20\nA;1;10\nA;2;10\nD;1\nD;2\nC\nO\n".parse().unwrap();
/// let outcome = CommandEngine::default().run(&trace, Placement::FirstFit).unwrap();
///
/// assert_eq!(outcome.snapshots.len(), 1);
/// assert_eq!(outcome.report.free.len(), 1);
/// assert_eq!(outcome.report.fragmentation, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandEngine {
    options: ArenaOptions,
}

impl CommandEngine {
    pub fn new(options: ArenaOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::new(config.arena_options())
    }

    pub fn options(&self) -> ArenaOptions {
        self.options
    }

    /// Applies one command. Returns the snapshot if it was an output command.
    ///
    /// The instruction counter is advanced first, so the first command of a
    /// run is instruction 1.
    pub fn step(
        &self,
        arena: &mut MemoryArena,
        command: &Command,
        strategy: &dyn FitStrategy,
    ) -> Option<ArenaReport> {
        let instruction = arena.begin_instruction();
        tracing::trace!(instruction, %command, "applying");

        match *command {
            Command::Allocate { id, size } => {
                if let Err(record) = arena.allocate(size, id, strategy) {
                    tracing::warn!(instruction, %id, size, %record, "allocation failed");
                }
                None
            }
            Command::Deallocate { id } => {
                if let Err(record) = arena.deallocate(id) {
                    tracing::warn!(instruction, %id, %record, "deallocation failed");
                }
                None
            }
            Command::Compact => {
                arena.compact();
                None
            }
            Command::Output => Some(arena.output()),
        }
    }

    /// Replays `trace` with `placement`, keeping snapshots in memory only.
    pub fn run(&self, trace: &Trace, placement: Placement) -> Result<RunOutcome, SimulatorError> {
        self.run_with_sink(trace, placement, &mut NullSink)
    }

    /// Replays `trace` with `placement`, passing each snapshot to `sink`.
    pub fn run_with_sink(
        &self,
        trace: &Trace,
        placement: Placement,
        sink: &mut dyn ReportSink,
    ) -> Result<RunOutcome, SimulatorError> {
        let start = Instant::now();
        let mut arena = MemoryArena::with_options(trace.capacity, self.options)?;
        tracing::info!(
            %placement,
            capacity = trace.capacity,
            commands = trace.len(),
            "replaying trace"
        );

        let mut snapshots = Vec::new();
        for command in trace {
            if let Some(report) = self.step(&mut arena, command, &placement) {
                sink.emit(arena.output_count(), &report)?;
                snapshots.push(report);
            }
        }

        let outcome = RunOutcome {
            placement,
            report: arena.report(),
            snapshots,
            stats: arena.stats().clone(),
            elapsed: start.elapsed(),
        };
        tracing::info!("{}", outcome.summary());
        tracing::debug!("{}", outcome.stats.summary());
        Ok(outcome)
    }

    /// Replays `trace` once per placement, each on an independent arena.
    pub fn run_all(
        &self,
        trace: &Trace,
        placements: &[Placement],
    ) -> Result<Vec<RunOutcome>, SimulatorError> {
        placements.iter().map(|&p| self.run(trace, p)).collect()
    }

    /// Replays `trace` for every placement `config` selects, writing
    /// snapshot files when the config names an output directory.
    ///
    /// Files are named after the trace file (`output` if unknown); when
    /// several placements run, the placement name is added to the stem.
    pub fn run_with_config(
        config: &SimulatorConfig,
        trace: &Trace,
    ) -> Result<Vec<RunOutcome>, SimulatorError> {
        let engine = Self::from_config(config);
        let placements = config.placements()?;
        let stem = config
            .trace_path
            .as_deref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_STEM);

        let mut outcomes = Vec::with_capacity(placements.len());
        for &placement in &placements {
            let outcome = match (&config.output_dir, config.output_policy) {
                (Some(dir), policy) if policy != OutputPolicy::None => {
                    let stem = if placements.len() > 1 {
                        format!("{stem}.{placement}")
                    } else {
                        stem.to_string()
                    };
                    let mut sink = FileSink::new(dir, stem, policy);
                    engine.run_with_sink(trace, placement, &mut sink)?
                }
                _ => engine.run(trace, placement)?,
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
