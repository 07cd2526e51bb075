// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `memsim inspect` command: summarise a trace without running it.

use anyhow::Context;
use std::path::Path;
use trace_io::Trace;

pub fn execute(path: &Path, json: bool) -> anyhow::Result<()> {
    let trace = Trace::from_file(path)
        .with_context(|| format!("failed to load trace '{}'", path.display()))?;
    let stats = trace.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("  Trace: {}", path.display());
    println!("  Capacity: {}", stats.capacity);
    println!();
    println!("  {:<12} {:>8}", "Command", "Count");
    println!("  {}", "-".repeat(21));
    for (name, count) in [
        ("allocate", stats.allocations),
        ("deallocate", stats.deallocations),
        ("compact", stats.compactions),
        ("output", stats.outputs),
    ] {
        println!("  {name:<12} {count:>8}");
    }
    println!("  {:<12} {:>8}", "total", stats.commands());
    println!();
    println!("  Distinct ids:    {}", stats.distinct_ids);
    println!("  Units requested: {}", stats.total_requested);
    println!("  Largest request: {}", stats.largest_request);
    if stats.largest_request > stats.capacity {
        println!("  Note: some requests exceed the capacity and will always fail.");
    }
    Ok(())
}
