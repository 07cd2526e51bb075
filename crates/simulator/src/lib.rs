// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # simulator
//!
//! Replays command traces against memory arenas and collects the results.
//!
//! - [`CommandEngine`]: applies a [`trace_io::Trace`] to a fresh
//!   [`memory_arena::MemoryArena`] with one placement, or to one arena per
//!   placement for comparisons.
//! - [`SimulatorConfig`]: TOML configuration for a run.
//! - [`ReportSink`] / [`FileSink`]: where output snapshots go, governed by
//!   an [`OutputPolicy`].
//! - [`Comparison`]: per-placement metrics in a printable table.
//!
//! # Example
//! ```
//! use fit_strategy::Placement;
//! use simulator::{CommandEngine, Comparison};
//! use trace_io::Trace;
//!
//! let trace: Trace = "100\nA;1;60\nD;1\nA;2;30\nA;3;50\nO\n".parse().unwrap();
//! let outcomes = CommandEngine::default().run_all(&trace, &Placement::ALL).unwrap();
//! let table = Comparison::new(&outcomes).table();
//! assert_eq!(table.lines().count(), 2 + outcomes.len());
//! ```

mod config;
mod engine;
mod error;
mod metrics;
mod sink;

pub use config::SimulatorConfig;
pub use engine::{CommandEngine, RunOutcome};
pub use error::SimulatorError;
pub use metrics::{Comparison, RunMetrics};
pub use sink::{FileSink, NullSink, OutputPolicy, ReportSink};
