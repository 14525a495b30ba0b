// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region tree benchmarks: boundary count × average range length, for integer
//! and long byte-string boundaries.

use std::hint::black_box;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use understory_benches::{Op, byte_keys, int_keys, pick_op, pick_range};
use understory_region_tree::RegionTree;

const BOUNDARIES: [usize; 2] = [100, 10_000];
const RANGE_LENGTHS: [usize; 3] = [1, 10, 100];

fn mixed_workload<B: Ord + Clone>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    keys: &[B],
    mean_len: usize,
) {
    let id = BenchmarkId::new(name, format!("boundaries={}/range-length={mean_len}", keys.len()));
    group.bench_function(id, |b| {
        let mut tree = RegionTree::<B, u64>::new();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut total = 0_u64;
        b.iter(|| {
            let (s, e) = pick_range(&mut rng, keys.len(), mean_len);
            let (start, end) = (&keys[s], &keys[e]);
            match pick_op(&mut rng) {
                Op::Increment => tree.update(start, end, |p| p + 1),
                Op::Reset => tree.update(start, end, |_| 0),
                Op::Enumerate => tree.enumerate(start, end, |_, _, p| {
                    total = total.wrapping_add(*p);
                    true
                }),
            }
        });
        black_box(total);
    });
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_tree");
    for n in BOUNDARIES {
        let ints = int_keys(n);
        let bytes = byte_keys(n);
        for mean_len in RANGE_LENGTHS {
            mixed_workload(&mut group, "int-keys", &ints, mean_len);
            mixed_workload(&mut group, "byte-keys", &bytes, mean_len);
        }
    }
    group.finish();
}

/// Snapshot a populated tree, then write to the snapshot. Only the written
/// path is copied, so this should stay flat as the tree grows.
fn bench_clone_then_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_then_update");
    for n in BOUNDARIES {
        let keys = int_keys(n);
        let mut base = RegionTree::<u64, u64>::new();
        let mut rng = StdRng::seed_from_u64(n as u64);
        for _ in 0..n {
            let (s, e) = pick_range(&mut rng, keys.len(), 10);
            base.update(&keys[s], &keys[e], |p| p + 1);
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let mut snapshot = base.clone();
                let (s, e) = pick_range(&mut rng, keys.len(), 1);
                snapshot.update(&keys[s], &keys[e], |p| p + 1);
                black_box(snapshot.boundary_count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mixed, bench_clone_then_update);
criterion_main!(benches);
