// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memsim
//!
//! Command-line interface for the memsim allocator simulator.
//!
//! ## Usage
//! ```bash
//! # Replay a trace with one strategy and print the final state
//! memsim run --trace ./traces/test.in --strategy best-fit
//!
//! # Keep every snapshot on disk, each file holding all earlier ones
//! memsim run --trace ./traces/test.in --output-dir ./out --output-policy accumulate
//!
//! # Compare all strategies on the same trace
//! memsim compare --trace ./traces/test.in
//!
//! # Summarise a trace without running it
//! memsim inspect --trace ./traces/test.in
//! ```

mod commands;

use clap::{Parser, Subcommand};
use memory_arena::{CoalescePolicy, DeallocDiagnostics};
use simulator::OutputPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "memsim",
    about = "Free-list memory allocator simulator with pluggable placement strategies",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file; command-line flags override it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a trace and print the final report of each run.
    Run {
        /// Path to the command trace.
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Placement: first-fit, best-fit, worst-fit, or all.
        #[arg(short, long)]
        strategy: Option<String>,

        /// Coalescing on deallocation: single-sided or bilateral.
        #[arg(long)]
        coalesce: Option<CoalescePolicy>,

        /// Double-free diagnostics: error-log or history.
        #[arg(long)]
        dealloc_diagnostics: Option<DeallocDiagnostics>,

        /// Directory for snapshot files.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Snapshot persistence: snapshot, accumulate, or none.
        #[arg(long)]
        output_policy: Option<OutputPolicy>,

        /// Print the outcomes as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Run every placement on the same trace and print a comparison table.
    Compare {
        /// Path to the command trace.
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Coalescing on deallocation: single-sided or bilateral.
        #[arg(long)]
        coalesce: Option<CoalescePolicy>,

        /// Print the comparison as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Summarise a trace without running it.
    Inspect {
        /// Path to the command trace.
        #[arg(short, long)]
        trace: PathBuf,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            trace,
            strategy,
            coalesce,
            dealloc_diagnostics,
            output_dir,
            output_policy,
            json,
        } => {
            commands::override_opt(&mut config.trace_path, trace);
            commands::override_value(&mut config.strategy, strategy);
            commands::override_value(&mut config.coalesce, coalesce);
            commands::override_value(&mut config.dealloc_diagnostics, dealloc_diagnostics);
            commands::override_opt(&mut config.output_dir, output_dir);
            commands::override_value(&mut config.output_policy, output_policy);
            commands::run::execute(&config, json)
        }
        Commands::Compare {
            trace,
            coalesce,
            json,
        } => {
            commands::override_opt(&mut config.trace_path, trace);
            commands::override_value(&mut config.coalesce, coalesce);
            commands::compare::execute(&config, json)
        }
        Commands::Inspect { trace, json } => commands::inspect::execute(&trace, json),
    }
}
