// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the safety check.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resource_state::{state::Validated, SystemState};
use safety_checker::{CheckOptions, MultiPassScan, RestartScan, SafetyAlgorithm};

/// Worst case for the multi-pass scan: only the last unfinished process is
/// executable in each pass, so the check takes `P` passes.
fn reverse_chain(processes: usize, resources: usize) -> SystemState<Validated> {
    let allocation = vec![vec![1u64; resources]; processes];
    let max_need = (0..processes)
        .map(|i| vec![1 + (processes - i) as u64; resources])
        .collect();
    SystemState::from_rows(allocation, max_need, vec![1; resources])
        .unwrap()
        .validate()
        .unwrap()
}

/// Best case: everything is executable in the first pass.
fn all_ready(processes: usize, resources: usize) -> SystemState<Validated> {
    let allocation = vec![vec![1u64; resources]; processes];
    let max_need = vec![vec![2u64; resources]; processes];
    SystemState::from_rows(allocation, max_need, vec![1; resources])
        .unwrap()
        .validate()
        .unwrap()
}

fn bench_worst_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_chain");
    let algorithms: Vec<Box<dyn SafetyAlgorithm>> =
        vec![Box::new(MultiPassScan::new()), Box::new(RestartScan::new())];

    for &p in &[8usize, 64, 256] {
        let state = reverse_chain(p, 4);
        for algorithm in &algorithms {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), p), &state, |b, s| {
                b.iter(|| algorithm.check(black_box(s), &CheckOptions::default()))
            });
        }
    }
    group.finish();
}

fn bench_best_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_ready");
    for &p in &[8usize, 64, 256] {
        let state = all_ready(p, 4);
        group.bench_with_input(BenchmarkId::from_parameter(p), &state, |b, s| {
            b.iter(|| MultiPassScan::new().check(black_box(s), &CheckOptions::default()))
        });
    }
    group.finish();
}

fn bench_trace_overhead(c: &mut Criterion) {
    let state = reverse_chain(64, 4);
    c.bench_function("trace/64", |b| {
        b.iter(|| MultiPassScan::new().check(black_box(&state), &CheckOptions::with_trace()))
    });
}

criterion_group!(benches, bench_worst_case, bench_best_case, bench_trace_overhead);
criterion_main!(benches);
