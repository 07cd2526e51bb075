// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: trace file → engine → report files.
//!
//! These tests drive all five crates together, from parsing a trace on disk
//! to checking the snapshot files that a run leaves behind.

use block_core::BlockId;
use fit_strategy::Placement;
use memory_arena::{CoalescePolicy, DeallocDiagnostics, ErrorKind, MemoryArena};
use simulator::{CommandEngine, Comparison, OutputPolicy, SimulatorConfig};
use std::path::Path;
use trace_io::{Command, Trace};

// ── Helpers ────────────────────────────────────────────────────

const FRAGMENTING: &str = "\
# three holes of 10, 30 and 20 units, separated by 1-unit spacers
62
A;1;10
A;100;1
A;2;30
A;101;1
A;3;20
D;1
D;2
D;3
O
A;4;15
O
D;4
C
O
";

fn write_trace(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn config(dir: &Path, trace: &Path, strategy: &str, policy: OutputPolicy) -> SimulatorConfig {
    SimulatorConfig {
        trace_path: Some(trace.to_path_buf()),
        strategy: strategy.into(),
        output_policy: policy,
        output_dir: Some(dir.join("out")),
        ..Default::default()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[test]
fn test_end_to_end_snapshot_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(dir.path(), "frag.in", FRAGMENTING);
    let cfg = config(dir.path(), &path, "best-fit", OutputPolicy::Snapshot);

    let trace = Trace::from_file(&path).unwrap();
    let outcomes = CommandEngine::run_with_config(&cfg, &trace).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].snapshots.len(), 3);

    let second = std::fs::read_to_string(dir.path().join("out/frag.out2")).unwrap();
    assert_eq!(
        second,
        "Size:\n62\nUsed Blocks:\n4;42;57\n100;10;11\n101;41;42\n\
         Free Blocks:\n0;10\n11;41\n57;62\n\
         Fragmentation:\n0.333333\nErrors:\nNone\n"
    );

    // Freeing 4 merges it back into [57,62); compaction finds nothing to join.
    let third = &outcomes[0].snapshots[2];
    let free: Vec<_> = third.free.iter().map(|b| b.range()).collect();
    assert_eq!(free, vec![(0, 10), (11, 41), (42, 62)]);
}

#[test]
fn test_accumulated_files_grow() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(dir.path(), "frag.in", FRAGMENTING);
    let cfg = config(dir.path(), &path, "first-fit", OutputPolicy::Accumulate);

    let trace = Trace::from_file(&path).unwrap();
    let outcome = &CommandEngine::run_with_config(&cfg, &trace).unwrap()[0];

    let read = |n: u64| std::fs::read_to_string(dir.path().join(format!("out/frag.out{n}"))).unwrap();
    let expected: String = outcome.snapshots.iter().map(ToString::to_string).collect();
    assert_eq!(read(3), expected);
    assert!(read(2).len() < read(3).len());
    assert!(read(3).starts_with(&read(2)));
    assert_eq!(read(3).matches("Size:").count(), 3);
}

#[test]
fn test_no_files_without_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(dir.path(), "frag.in", FRAGMENTING);
    let cfg = config(dir.path(), &path, "all", OutputPolicy::None);

    let trace = Trace::from_file(&path).unwrap();
    let outcomes = CommandEngine::run_with_config(&cfg, &trace).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.snapshots.len() == 3));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_strategies_differ_on_same_trace() {
    let trace: Trace = FRAGMENTING.parse().unwrap();
    let outcomes = CommandEngine::default()
        .run_all(&trace, &Placement::ALL)
        .unwrap();

    let start_of_4 = |i: usize| {
        outcomes[i].snapshots[1]
            .used
            .iter()
            .find(|b| b.is_owned_by(BlockId(4)))
            .map(|b| b.start())
    };
    assert_eq!(start_of_4(0), Some(11));
    assert_eq!(start_of_4(1), Some(42));
    assert_eq!(start_of_4(2), Some(11));

    let cmp = Comparison::new(&outcomes);
    assert_eq!(cmp.rows.len(), 3);
    for row in &cmp.rows {
        assert!((0.0..=1.0).contains(&row.fragmentation));
    }
}

#[test]
fn test_double_free_diagnostics_from_config() {
    let trace: Trace = "10\nA;1;50\nD;1\nA;2;5\nD;2\nD;2\n".parse().unwrap();
    let run = |diag| {
        let cfg = SimulatorConfig {
            dealloc_diagnostics: diag,
            ..Default::default()
        };
        CommandEngine::from_config(&cfg)
            .run(&trace, Placement::FirstFit)
            .unwrap()
    };

    for diag in [DeallocDiagnostics::ErrorLog, DeallocDiagnostics::History] {
        let outcome = run(diag);
        let errors = outcome.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].to_string(), "A;1;10");
        // The two failed deallocations must be told apart.
        assert_ne!(errors[1].param(), errors[2].param());
    }
}

#[test]
fn test_manual_loop_matches_engine() {
    let trace: Trace = FRAGMENTING.parse().unwrap();
    let engine = CommandEngine::default();
    let outcome = engine.run(&trace, Placement::WorstFit).unwrap();

    let mut arena = MemoryArena::new(trace.capacity).unwrap();
    let mut snaps = Vec::new();
    for cmd in &trace {
        if let Some(report) = engine.step(&mut arena, cmd, &Placement::WorstFit) {
            snaps.push(report);
        }
    }
    assert_eq!(snaps, outcome.snapshots);
    assert_eq!(arena.report(), outcome.report);
    arena.verify().unwrap();
}

#[test]
fn test_bilateral_from_toml_config() {
    let cfg = SimulatorConfig::from_toml("coalesce = \"bilateral\"\n").unwrap();
    assert_eq!(cfg.coalesce, CoalescePolicy::Bilateral);

    let trace = Trace::new(
        30,
        vec![
            Command::Allocate { id: BlockId(1), size: 10 },
            Command::Allocate { id: BlockId(2), size: 10 },
            Command::Allocate { id: BlockId(3), size: 10 },
            Command::Deallocate { id: BlockId(1) },
            Command::Deallocate { id: BlockId(3) },
            Command::Deallocate { id: BlockId(2) },
            Command::Deallocate { id: BlockId(2) },
        ],
    );
    let outcome = CommandEngine::from_config(&cfg)
        .run(&trace, Placement::FirstFit)
        .unwrap();
    assert_eq!(outcome.report.free.len(), 1);
    assert_eq!(outcome.report.fragmentation, 0.0);
    assert!(matches!(
        outcome.errors()[0].kind,
        ErrorKind::DeallocFailure { .. }
    ));
    assert_eq!(outcome.errors()[0].instruction, 7);
}

#[test]
fn test_json_outcome() {
    let trace: Trace = "10\nA;1;4\nO\n".parse().unwrap();
    let outcome = CommandEngine::default().run(&trace, Placement::BestFit).unwrap();
    let v = serde_json::to_value(&outcome).unwrap();
    assert_eq!(v["placement"], "best-fit");
    assert_eq!(v["report"]["capacity"], 10);
    assert_eq!(v["snapshots"].as_array().unwrap().len(), 1);
    assert_eq!(v["stats"]["allocations"], 1);
}
