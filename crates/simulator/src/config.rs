// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulation configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! trace_path = "./traces/test.in"
//! strategy = "best-fit"            # first-fit | best-fit | worst-fit | all
//! coalesce = "single-sided"        # single-sided | bilateral
//! dealloc_diagnostics = "error-log"  # error-log | history
//! output_policy = "snapshot"       # snapshot | accumulate | none
//! output_dir = "./out"
//! ```

use crate::{OutputPolicy, SimulatorError};
use fit_strategy::Placement;
use memory_arena::{ArenaOptions, CoalescePolicy, DeallocDiagnostics};
use std::path::{Path, PathBuf};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulatorConfig {
    /// Path to the command trace.
    pub trace_path: Option<PathBuf>,
    /// Placement name, or `"all"` to compare every placement.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub coalesce: CoalescePolicy,
    #[serde(default)]
    pub dealloc_diagnostics: DeallocDiagnostics,
    #[serde(default)]
    pub output_policy: OutputPolicy,
    /// Directory for snapshot files. No files are written without one.
    pub output_dir: Option<PathBuf>,
}

fn default_strategy() -> String {
    "first-fit".to_string()
}

impl SimulatorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SimulatorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimulatorError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SimulatorError> {
        toml::from_str(toml_str)
            .map_err(|e| SimulatorError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SimulatorError> {
        toml::to_string_pretty(self)
            .map_err(|e| SimulatorError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Resolves the strategy name into the placements to run.
    pub fn placements(&self) -> Result<Vec<Placement>, SimulatorError> {
        if self.strategy.eq_ignore_ascii_case("all") {
            return Ok(Placement::ALL.to_vec());
        }
        Ok(vec![self.strategy.parse()?])
    }

    /// Arena options derived from this config.
    pub fn arena_options(&self) -> ArenaOptions {
        ArenaOptions {
            coalesce: self.coalesce,
            dealloc_diagnostics: self.dealloc_diagnostics,
        }
    }

    /// The trace path, or an error if none was configured.
    pub fn require_trace_path(&self) -> Result<&Path, SimulatorError> {
        self.trace_path
            .as_deref()
            .ok_or_else(|| SimulatorError::ConfigError("no trace path configured".into()))
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            trace_path: None,
            strategy: default_strategy(),
            coalesce: CoalescePolicy::default(),
            dealloc_diagnostics: DeallocDiagnostics::default(),
            output_policy: OutputPolicy::default(),
            output_dir: None,
        }
    }
}
