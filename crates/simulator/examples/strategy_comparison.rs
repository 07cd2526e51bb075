// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: compare placement strategies on a synthetic churn trace.
//!
//! Builds a trace that allocates many blocks of mixed sizes, frees every
//! other one, then asks for medium-sized blocks that only some holes can
//! take. Prints the final state of each placement side by side.
//!
//! ```bash
//! cargo run -p simulator --example strategy_comparison
//! ```

use block_core::BlockId;
use fit_strategy::Placement;
use memory_arena::{ArenaOptions, CoalescePolicy};
use simulator::{CommandEngine, Comparison};
use trace_io::{Command, Trace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let trace = build_trace(4096, 64);
    println!("Trace: {}\n", trace.stats().summary());

    for coalesce in [CoalescePolicy::SingleSided, CoalescePolicy::Bilateral] {
        let engine = CommandEngine::new(ArenaOptions {
            coalesce,
            ..Default::default()
        });
        let outcomes = engine.run_all(&trace, &Placement::ALL)?;
        let comparison = Comparison::new(&outcomes);

        println!("--- coalesce: {coalesce:?} ---");
        print!("{}", comparison.table());
        if let Some(best) = comparison.best() {
            println!("best: {}\n", best.placement);
        }
    }

    Ok(())
}

/// Allocates `blocks` blocks of cycling sizes, frees the odd ones, then
/// requests medium blocks into the holes.
fn build_trace(capacity: u64, blocks: u64) -> Trace {
    let size_of = |i: u64| 16 + (i * 37) % 80;
    let mut commands = Vec::new();

    for i in 0..blocks {
        commands.push(Command::Allocate {
            id: BlockId(i),
            size: size_of(i),
        });
    }
    for i in (1..blocks).step_by(2) {
        commands.push(Command::Deallocate { id: BlockId(i) });
    }
    commands.push(Command::Output);
    for i in 0..blocks / 2 {
        commands.push(Command::Allocate {
            id: BlockId(blocks + i),
            size: 40 + (i * 13) % 50,
        });
    }
    commands.push(Command::Compact);
    commands.push(Command::Output);

    Trace::new(capacity, commands)
}
