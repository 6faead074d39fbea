//! Criterion benchmarks for the fork-join driver.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use forksum_core::driver::{compute_inline, Driver};
use forksum_core::options::Options;
use forksum_core::range::UnitRange;
use forksum_core::spawner::ThreadSpawner;

fn bench_threaded(c: &mut Criterion) {
    let driver = Driver::new(Arc::new(ThreadSpawner::new()));
    let widths: Vec<i64> = vec![16, 128, 1_024];

    let mut group = c.benchmark_group("ThreadUnits");
    for &width in &widths {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| driver.compute(UnitRange::new(1, width)).unwrap());
        });
    }
    group.finish();
}

fn bench_cutoff(c: &mut Criterion) {
    let range = UnitRange::new(1, 4_096);
    let cutoffs: Vec<u64> = vec![64, 512, 4_096];

    let mut group = c.benchmark_group("Cutoff");
    for &cutoff in &cutoffs {
        let opts = Options {
            cutoff,
            ..Options::default()
        };
        let driver = Driver::with_options(Arc::new(ThreadSpawner::new()), &opts);
        group.bench_with_input(BenchmarkId::from_parameter(cutoff), &range, |b, &range| {
            b.iter(|| driver.compute(range).unwrap());
        });
    }
    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    c.bench_function("inline/4096", |b| {
        b.iter(|| compute_inline(UnitRange::new(1, 4_096)).unwrap());
    });
}

criterion_group!(benches, bench_threaded, bench_cutoff, bench_inline);
criterion_main!(benches);
