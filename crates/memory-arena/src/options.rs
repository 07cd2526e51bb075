// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Behavioural switches for a [`crate::MemoryArena`].
//!
//! Both switches default to the classic trace behaviour; changing either one
//! changes reported fragmentation or error details.

use crate::ArenaError;

/// How a released block is merged with its free neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoalescePolicy {
    /// Merge with the first adjacent free block found, and only that one.
    /// A block with free neighbours on both sides stays split from one of them.
    #[default]
    SingleSided,
    /// Keep merging until no adjacent free block remains.
    Bilateral,
}

/// How a failed deallocation decides between "never allocated" and
/// "already freed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeallocDiagnostics {
    /// "Already freed" iff the error log holds an allocation failure for the
    /// same id. This is the classic approximation: an id whose allocation
    /// failed is reported as already freed, and an id that really was freed
    /// is reported as never allocated.
    #[default]
    ErrorLog,
    /// "Already freed" iff the id was successfully allocated at some point.
    History,
}

impl std::str::FromStr for CoalescePolicy {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "single-sided" | "single" => Ok(Self::SingleSided),
            "bilateral" | "both" => Ok(Self::Bilateral),
            other => Err(ArenaError::UnknownOption {
                option: "coalesce policy",
                value: other.to_string(),
            }),
        }
    }
}

impl std::str::FromStr for DeallocDiagnostics {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "error-log" | "log" => Ok(Self::ErrorLog),
            "history" => Ok(Self::History),
            other => Err(ArenaError::UnknownOption {
                option: "dealloc diagnostics mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Options fixed at arena construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArenaOptions {
    #[serde(default)]
    pub coalesce: CoalescePolicy,
    #[serde(default)]
    pub dealloc_diagnostics: DeallocDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("bilateral".parse::<CoalescePolicy>().unwrap(), CoalescePolicy::Bilateral);
        assert_eq!("Single_Sided".parse::<CoalescePolicy>().unwrap(), CoalescePolicy::SingleSided);
        assert_eq!("history".parse::<DeallocDiagnostics>().unwrap(), DeallocDiagnostics::History);
        assert!(matches!(
            "both-ways".parse::<CoalescePolicy>(),
            Err(ArenaError::UnknownOption { value, .. }) if value == "both-ways"
        ));
    }

    #[test]
    fn test_serde_names() {
        let opts: ArenaOptions =
            serde_json::from_str(r#"{"coalesce":"bilateral","dealloc_diagnostics":"error-log"}"#)
                .unwrap();
        assert_eq!(opts.coalesce, CoalescePolicy::Bilateral);
        assert_eq!(opts.dealloc_diagnostics, DeallocDiagnostics::ErrorLog);
        let empty: ArenaOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ArenaOptions::default());
    }
}
