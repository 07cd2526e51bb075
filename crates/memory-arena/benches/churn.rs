// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for allocate/deallocate churn and compaction.

use block_core::BlockId;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fit_strategy::Placement;
use memory_arena::MemoryArena;

/// Fills the arena with `n` blocks and frees every other one.
fn checkerboard(n: u64) -> MemoryArena {
    let mut arena = MemoryArena::new(n * 64).unwrap();
    for i in 0..n {
        let _ = arena.allocate(16 + (i * 7) % 48, BlockId(i), &Placement::FirstFit);
    }
    for i in (0..n).step_by(2) {
        let _ = arena.deallocate(BlockId(i));
    }
    arena
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    for n in [64u64, 512] {
        for placement in Placement::ALL {
            group.bench_with_input(BenchmarkId::new(placement.as_str(), n), &n, |b, &n| {
                b.iter(|| {
                    let mut arena = checkerboard(n);
                    for i in 0..n / 2 {
                        let _ = arena.allocate(black_box(24), BlockId(n + i), &placement);
                    }
                    arena.fragmentation()
                })
            });
        }
    }
    group.finish();
}

fn bench_compact(c: &mut Criterion) {
    c.bench_function("compact/512", |b| {
        b.iter_batched(
            || {
                let mut arena = checkerboard(512);
                for i in (1..512).step_by(2) {
                    let _ = arena.deallocate(BlockId(i));
                }
                arena
            },
            |mut arena| arena.compact(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_churn, bench_compact);
criterion_main!(benches);
