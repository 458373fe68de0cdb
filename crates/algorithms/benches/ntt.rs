//! Benchmarks for the number theoretic transform
//!
//! Measures forward and inverse transforms, the pointwise product and the
//! full transform-based multiplication against the schoolbook product.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use pqsig_algorithms::poly::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

type P = Polynomial<DilithiumRing>;

fn random_poly(rng: &mut ChaCha20Rng) -> P {
    P::from_fn(|_| rng.gen_range(0..DilithiumRing::Q))
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilithium_ntt");
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let poly = random_poly(&mut rng);
    let mut transformed = poly.clone();
    transformed.ntt_inplace().expect("forward transform");

    group.bench_function("forward", |b| {
        b.iter_batched(
            || poly.clone(),
            |mut p| {
                p.ntt_inplace().expect("forward transform");
                black_box(p)
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("inverse_tomont", |b| {
        b.iter_batched(
            || transformed.clone(),
            |mut p| {
                p.inv_ntt_tomont_inplace().expect("inverse transform");
                black_box(p)
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("pointwise", |b| {
        b.iter(|| black_box(transformed.pointwise_montgomery(black_box(&transformed))))
    });

    group.finish();
}

fn bench_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilithium_mul");
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let a = random_poly(&mut rng);
    let b = random_poly(&mut rng);

    group.bench_function("ntt_mul", |bench| {
        bench.iter(|| black_box(a.ntt_mul(black_box(&b)).expect("ntt product")))
    });
    group.bench_function("schoolbook", |bench| {
        bench.iter(|| black_box(a.schoolbook_mul(black_box(&b))))
    });
    group.bench_function("montgomery_mul", |bench| {
        bench.iter(|| montgomery_mul::<DilithiumRing>(black_box(5_771_523), black_box(25_847)))
    });

    group.finish();
}

criterion_group!(benches, bench_transforms, bench_multiplication);
criterion_main!(benches);
