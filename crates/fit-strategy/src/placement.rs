// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The closed set of built-in placement strategies as a value.

use crate::{BestFit, FirstFit, FitError, FitStrategy, WorstFit};
use block_core::{BlockList, Size};
use std::fmt;
use std::str::FromStr;

/// A built-in placement strategy, selectable by name.
///
/// The strategy is always passed explicitly into an allocation; there is no
/// process-wide "current strategy".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    FirstFit,
    BestFit,
    WorstFit,
}

impl Placement {
    /// All built-in placements, in report order.
    pub const ALL: [Placement; 3] = [Placement::FirstFit, Placement::BestFit, Placement::WorstFit];

    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::FirstFit => "first-fit",
            Placement::BestFit => "best-fit",
            Placement::WorstFit => "worst-fit",
        }
    }

    /// Returns the strategy implementation for this placement.
    pub fn strategy(self) -> &'static dyn FitStrategy {
        match self {
            Placement::FirstFit => &FirstFit,
            Placement::BestFit => &BestFit,
            Placement::WorstFit => &WorstFit,
        }
    }
}

impl FitStrategy for Placement {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn select(&self, requested: Size, free: &BlockList) -> Result<usize, FitError> {
        self.strategy().select(requested, free)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = FitError;

    /// Case-insensitive; accepts `first-fit`, `first_fit`, `firstfit` and
    /// `first` (likewise for best/worst).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalised.as_str() {
            "firstfit" | "first" => Ok(Placement::FirstFit),
            "bestfit" | "best" => Ok(Placement::BestFit),
            "worstfit" | "worst" => Ok(Placement::WorstFit),
            _ => Err(FitError::UnknownPlacement(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_core::Block;

    #[test]
    fn test_parse_aliases() {
        for s in ["first-fit", "FirstFit", "first_fit", "first", " FIRST "] {
            assert_eq!(s.parse::<Placement>().unwrap(), Placement::FirstFit, "{s}");
        }
        assert_eq!("best".parse::<Placement>().unwrap(), Placement::BestFit);
        assert_eq!("WorstFit".parse::<Placement>().unwrap(), Placement::WorstFit);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "next-fit".parse::<Placement>().unwrap_err();
        assert_eq!(err, FitError::UnknownPlacement("next-fit".into()));
    }

    #[test]
    fn test_display_roundtrip() {
        for p in Placement::ALL {
            assert_eq!(p.to_string().parse::<Placement>().unwrap(), p);
            assert_eq!(p.name(), p.strategy().name());
        }
    }

    #[test]
    fn test_dispatch_matches_strategies() {
        let free: BlockList = [Block::free(0, 10), Block::free(11, 30), Block::free(42, 20)]
            .into_iter()
            .collect();
        assert_eq!(Placement::FirstFit.select(15, &free), Ok(1));
        assert_eq!(Placement::BestFit.select(15, &free), Ok(2));
        assert_eq!(Placement::WorstFit.select(15, &free), Ok(1));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Placement::WorstFit).unwrap();
        assert_eq!(json, "\"worst-fit\"");
        let back: Placement = serde_json::from_str("\"best-fit\"").unwrap();
        assert_eq!(back, Placement::BestFit);
    }
}
