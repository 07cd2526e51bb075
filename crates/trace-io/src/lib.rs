// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trace-io
//!
//! The text format that drives a simulation run.
//!
//! - [`Command`]: one allocate, deallocate, compact or output step.
//! - [`Trace`]: the arena capacity plus the ordered commands, with a
//!   parser, a writer and [`TraceStats`] for quick inspection.
//! - [`TraceError`]: everything that makes a trace unusable. Parsing is
//!   all-or-nothing.
//!
//! # Example
//! ```
//! use trace_io::{Command, Trace};
//!
//! let trace: Trace = "100\nA;1;40\nD;1\nO\n".parse().unwrap();
//! assert_eq!(trace.capacity, 100);
//! assert_eq!(trace.commands.last(), Some(&Command::Output));
//! assert_eq!(trace.stats().allocations, 1);
//! ```

mod command;
mod error;
mod trace;

pub use command::{Command, CommandKind};
pub use error::TraceError;
pub use trace::{Trace, TraceStats};
