// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `memsim run` command: replay a trace and print the final state.

use simulator::{CommandEngine, OutputPolicy, RunOutcome, SimulatorConfig};

/// Width of the occupancy bar under each report.
const BAR_WIDTH: usize = 64;

pub fn execute(config: &SimulatorConfig, json: bool) -> anyhow::Result<()> {
    let trace = super::load_trace(config)?;
    let outcomes = CommandEngine::run_with_config(config, &trace)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in &outcomes {
        print_outcome(outcome);
    }
    match &config.output_dir {
        Some(dir) if config.output_policy != OutputPolicy::None => {
            let written: usize = outcomes.iter().map(|o| o.snapshots.len()).sum();
            println!("{written} snapshot(s) under {}", dir.display());
        }
        _ => {}
    }
    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    println!("== {} ==", outcome.placement);
    print!("{}", outcome.report);
    println!("[{}]", outcome.report.occupancy_bar(BAR_WIDTH));
    println!("{}", outcome.stats.summary());
    println!();
}
