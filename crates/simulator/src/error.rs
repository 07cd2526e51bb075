// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the simulator.

use std::path::PathBuf;

/// Errors that stop a simulation run.
///
/// Allocation and deallocation failures are not in this list: they are
/// recorded in the arena's error log and the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The trace could not be loaded.
    #[error("trace error: {0}")]
    TraceError(#[from] trace_io::TraceError),

    /// The arena could not be created from the trace.
    #[error("arena error: {0}")]
    ArenaError(#[from] memory_arena::ArenaError),

    /// A strategy name was not recognised.
    #[error("strategy error: {0}")]
    StrategyError(#[from] fit_strategy::FitError),

    /// A snapshot could not be written.
    #[error("cannot write snapshot '{}': {source}", path.display())]
    SinkError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
