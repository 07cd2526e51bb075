// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Where output snapshots go.
//!
//! The engine hands every snapshot to a [`ReportSink`] together with its
//! 1-based output number. [`FileSink`] persists them as `<stem>.out<N>`
//! according to an [`OutputPolicy`]; [`NullSink`] drops them.

use crate::SimulatorError;
use memory_arena::ArenaReport;
use std::path::{Path, PathBuf};

/// How output snapshots are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// Each file holds exactly one snapshot.
    #[default]
    Snapshot,
    /// Each file holds the previous file's content followed by the new
    /// snapshot.
    Accumulate,
    /// Nothing is written.
    None,
}

impl std::str::FromStr for OutputPolicy {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snapshot" => Ok(Self::Snapshot),
            "accumulate" => Ok(Self::Accumulate),
            "none" | "off" => Ok(Self::None),
            other => Err(SimulatorError::ConfigError(format!(
                "unknown output policy '{other}'; expected 'snapshot', 'accumulate', or 'none'"
            ))),
        }
    }
}

/// Receives output snapshots during a run.
pub trait ReportSink {
    /// Called once per output command; `index` starts at 1.
    fn emit(&mut self, index: u64, report: &ArenaReport) -> Result<(), SimulatorError>;
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn emit(&mut self, _index: u64, _report: &ArenaReport) -> Result<(), SimulatorError> {
        Ok(())
    }
}

/// Writes snapshots to `<dir>/<stem>.out<N>`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    stem: String,
    policy: OutputPolicy,
    /// Content of the last file written, for [`OutputPolicy::Accumulate`].
    previous: String,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>, policy: OutputPolicy) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            policy,
            previous: String::new(),
            written: Vec::new(),
        }
    }

    /// Path of the file for output number `index`.
    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}.out{index}", self.stem))
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn policy(&self) -> OutputPolicy {
        self.policy
    }
}

impl ReportSink for FileSink {
    fn emit(&mut self, index: u64, report: &ArenaReport) -> Result<(), SimulatorError> {
        let content = match self.policy {
            OutputPolicy::None => return Ok(()),
            OutputPolicy::Snapshot => report.to_string(),
            OutputPolicy::Accumulate => format!("{}{report}", self.previous),
        };

        let path = self.path_for(index);
        let write = |path: &Path| -> std::io::Result<()> {
            std::fs::create_dir_all(&self.dir)?;
            std::fs::write(path, &content)
        };
        write(&path).map_err(|source| SimulatorError::SinkError {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "snapshot written");
        if self.policy == OutputPolicy::Accumulate {
            self.previous = content;
        }
        self.written.push(path);
        Ok(())
    }
}
