// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `memsim compare` command: every placement on one trace, side by side.

use fit_strategy::Placement;
use simulator::{CommandEngine, Comparison, SimulatorConfig};

pub fn execute(config: &SimulatorConfig, json: bool) -> anyhow::Result<()> {
    let trace = super::load_trace(config)?;
    let outcomes = CommandEngine::from_config(config).run_all(&trace, &Placement::ALL)?;
    let comparison = Comparison::new(&outcomes);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("{}", trace.stats().summary());
    println!("coalesce: {:?}", config.coalesce);
    println!();
    print!("{}", comparison.table());
    if let Some(best) = comparison.best() {
        println!();
        println!(
            "best: {} ({} failed allocations, fragmentation {:.6})",
            best.placement, best.alloc_failures, best.fragmentation
        );
    }
    Ok(())
}
