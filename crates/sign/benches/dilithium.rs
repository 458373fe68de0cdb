//! Benchmarks for Dilithium digital signature algorithms (round 3.1).
//!
//! Key generation, signing and verification for Dilithium2, Dilithium3 and
//! Dilithium5 across several message sizes.

use api::Signature;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pqsig_sign::{category, Dilithium2, Dilithium3, Dilithium5, SecurityCategory};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Message sizes to benchmark (in bytes)
const MESSAGE_SIZES: &[usize] = &[32, 1024, 16384];

fn bench_keypair(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilithium_keypair");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    group.bench_function("dilithium2", |b| {
        b.iter(|| black_box(Dilithium2::keypair(&mut rng).unwrap()))
    });
    group.bench_function("dilithium3", |b| {
        b.iter(|| black_box(Dilithium3::keypair(&mut rng).unwrap()))
    });
    group.bench_function("dilithium5", |b| {
        b.iter(|| black_box(Dilithium5::keypair(&mut rng).unwrap()))
    });

    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilithium_sign");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    for category in SecurityCategory::ALL {
        let (_, sk) = category::keypair_with_rng(category, &mut rng).unwrap();
        for size in MESSAGE_SIZES {
            let message = vec![0x42u8; *size];
            group.bench_with_input(BenchmarkId::new(category.name(), size), size, |b, _| {
                b.iter(|| black_box(category::sign(category, &message, &sk).unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilithium_verify");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    for category in SecurityCategory::ALL {
        let (pk, sk) = category::keypair_with_rng(category, &mut rng).unwrap();
        for size in MESSAGE_SIZES {
            let message = vec![0x42u8; *size];
            let sig = category::sign(category, &message, &sk).unwrap();
            group.bench_with_input(BenchmarkId::new(category.name(), size), size, |b, _| {
                b.iter(|| black_box(category::verify(category, &message, &sig, &pk).unwrap()))
            });
        }
    }

    group.finish();
}

/// Signs varying messages so rejection-loop restarts show up in the spread
fn bench_signing_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilithium_signing_iterations");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
    let (_, sk) = Dilithium3::keypair(&mut rng).unwrap();
    let messages: Vec<Vec<u8>> = (0..10)
        .map(|i| format!("Message variant {}", i).into_bytes())
        .collect();

    group.bench_function("dilithium3_multi_sign", |b| {
        let mut idx = 0;
        b.iter(|| {
            let msg = &messages[idx % messages.len()];
            idx += 1;
            black_box(Dilithium3::sign(msg, &sk).unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair,
    bench_sign,
    bench_verify,
    bench_signing_iterations
);
criterion_main!(benches);
