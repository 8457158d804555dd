//! Benchmarks for counting, enumerating and combining large bitmaps.
//!
//! Run with `cargo bench --bench bitmap`.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistable_bitmap::Bitmap;
use std::hint::black_box;

fn patterned(bytes: usize, pattern: fn(usize) -> u8) -> Bitmap {
    Bitmap::from_bytes((0..bytes).map(pattern).collect())
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count");
    for bytes in [16, 4096, 1 << 20] {
        let bitmap = patterned(bytes, |i| (i as u8).wrapping_mul(37));
        group.bench_with_input(BenchmarkId::from_parameter(bytes), &bitmap, |b, bm| {
            b.iter(|| black_box(bm).count())
        });
    }
    group.finish();
}

fn bench_iter_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter_ones");
    let patterns: [(&str, fn(usize) -> u8); 3] = [
        ("sparse", |i| if i % 64 == 0 { 0x10 } else { 0 }),
        ("dense", |_| 0xff),
        ("mixed", |i| (i as u8).wrapping_mul(37)),
    ];
    for (name, pattern) in patterns {
        let bitmap = patterned(1 << 16, pattern);
        group.bench_with_input(BenchmarkId::new(name, 1 << 16), &bitmap, |b, bm| {
            b.iter(|| black_box(bm).iter_ones().fold(0usize, |acc, i| acc ^ i))
        });
    }
    group.finish();
}

fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");
    let a = patterned(1 << 16, |i| (i as u8).wrapping_mul(37));
    let b = patterned(3 << 14, |i| (i as u8).rotate_left(3));
    group.bench_function("and", |bench| bench.iter(|| black_box(&a).and(black_box(&b))));
    group.bench_function("or", |bench| bench.iter(|| black_box(&a).or(black_box(&b))));
    group.bench_function("xor", |bench| bench.iter(|| black_box(&a).xor(black_box(&b))));
    group.finish();
}

fn bench_persist(c: &mut Criterion) {
    let bitmap = patterned(1 << 16, |i| (i as u8).wrapping_mul(37));
    let persisted = bitmap.to_persistable();
    c.bench_function("to_persistable", |b| b.iter(|| black_box(&bitmap).to_persistable()));
    c.bench_function("from_persisted", |b| {
        b.iter(|| Bitmap::from_persisted(black_box(&persisted)))
    });
}

fn bench_set_range(c: &mut Criterion) {
    c.bench_function("set_range", |b| {
        b.iter(|| {
            let mut bm = Bitmap::new();
            bm.set_range(black_box(3), black_box(100_000));
            bm
        })
    });
}

criterion_group!(
    benches,
    bench_count,
    bench_iter_ones,
    bench_algebra,
    bench_persist,
    bench_set_range
);
criterion_main!(benches);
