// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the helpers they share.

pub mod compare;
pub mod inspect;
pub mod run;

use anyhow::Context;
use simulator::SimulatorConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v` when set.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file if one was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SimulatorConfig> {
    match path {
        Some(path) => {
            let config = SimulatorConfig::from_file(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?;
            tracing::info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(SimulatorConfig::default()),
    }
}

/// Replaces `slot` with `flag` if the flag was given.
pub fn override_value<T>(slot: &mut T, flag: Option<T>) {
    if let Some(value) = flag {
        *slot = value;
    }
}

/// Like [`override_value`] for settings that are optional in the config.
pub fn override_opt<T>(slot: &mut Option<T>, flag: Option<T>) {
    if flag.is_some() {
        *slot = flag;
    }
}

/// Loads the trace named by the config.
pub fn load_trace(config: &SimulatorConfig) -> anyhow::Result<trace_io::Trace> {
    let path = config
        .require_trace_path()
        .context("pass --trace or set trace_path in the config file")?;
    trace_io::Trace::from_file(path)
        .with_context(|| format!("failed to load trace '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_arena::CoalescePolicy;

    #[test]
    fn test_overrides() {
        let mut config = SimulatorConfig::default();
        override_value(&mut config.coalesce, Some(CoalescePolicy::Bilateral));
        override_value(&mut config.strategy, None);
        override_opt(&mut config.output_dir, Some("out".into()));
        override_opt(&mut config.trace_path, None);

        assert_eq!(config.coalesce, CoalescePolicy::Bilateral);
        assert_eq!(config.strategy, "first-fit");
        assert_eq!(config.output_dir, Some("out".into()));
        assert!(config.trace_path.is_none());
    }

    #[test]
    fn test_load_trace_requires_path() {
        let err = load_trace(&SimulatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--trace"));
    }

    #[test]
    fn test_load_missing_config() {
        assert!(load_config(Some(Path::new("/nonexistent/memsim.toml"))).is_err());
        assert_eq!(load_config(None).unwrap(), SimulatorConfig::default());
    }
}
