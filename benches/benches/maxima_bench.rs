//! # FunctionMaxima Benchmarks
//!
//! Measures the transactional mutation path (`set_value`, `erase`) and the
//! read path (`value_at`, ordered enumeration of the function and its maxima).
//!
//! Run: `cargo bench --bench maxima_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maxima_core::FunctionMaxima;

/// Serra com picos a cada 7 argumentos
fn sawtooth(size: i64) -> FunctionMaxima<i64, i64> {
    let mut function = FunctionMaxima::new();
    for a in 0..size {
        function.set_value(a, a % 7).unwrap();
    }
    function
}

/// Benchmark set_value
fn bench_set_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_value");

    for size in [100i64, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("build_ascending", size), size, |b, &size| {
            b.iter(|| black_box(sawtooth(size)))
        });

        let base = sawtooth(*size);
        group.bench_with_input(BenchmarkId::new("overwrite_middle", size), size, |b, &size| {
            let mut function = base.clone();
            let mut value = 0;
            b.iter(|| {
                value = (value + 3) % 11;
                function.set_value(size / 2, value).unwrap();
            })
        });
    }

    group.finish();
}

/// Benchmark erase
fn bench_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase");

    for size in [100i64, 1_000, 10_000].iter() {
        let base = sawtooth(*size);

        group.bench_with_input(BenchmarkId::new("erase_reinsert", size), size, |b, &size| {
            let mut function = base.clone();
            b.iter(|| {
                function.erase(&(size / 3)).unwrap();
                function.set_value(size / 3, (size / 3) % 7).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("erase_absent", size), size, |b, &size| {
            let mut function = base.clone();
            b.iter(|| function.erase(black_box(&(size + 1))).unwrap())
        });
    }

    group.finish();
}

/// Benchmark read path
fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let function = sawtooth(10_000);

    group.bench_function("value_at", |b| {
        b.iter(|| black_box(function.value_at(black_box(&4_321)).unwrap()))
    });

    group.bench_function("iter_all", |b| {
        b.iter(|| black_box(function.iter().count()))
    });

    group.bench_function("maxima_top_10", |b| {
        b.iter(|| {
            for point in function.maxima().take(10) {
                black_box(point);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_set_value, bench_erase, bench_queries);

criterion_main!(benches);
