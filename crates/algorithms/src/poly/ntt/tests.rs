//! Tests for the number theoretic transform

use super::*;
use crate::poly::params::{DilithiumRing, Modulus};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

type P = Polynomial<DilithiumRing>;

fn random_poly(rng: &mut ChaCha20Rng) -> P {
    P::from_fn(|_| rng.gen_range(0..DilithiumRing::Q))
}

fn small_poly(rng: &mut ChaCha20Rng, bound: i32) -> P {
    P::from_fn(|_| {
        let v: i32 = rng.gen_range(-bound..=bound);
        pqsig_internal::constant_time::ct_canonical(v, DilithiumRing::Q)
    })
}

#[test]
fn test_montgomery_reduce_basics() {
    assert_eq!(montgomery_reduce::<DilithiumRing>(DilithiumRing::MONT_R as u64), 1);
    assert_eq!(montgomery_reduce::<DilithiumRing>(0), 0);
    // x * R^2 * R^-1 = x * R
    assert_eq!(
        montgomery_mul::<DilithiumRing>(1, DilithiumRing::MONT_R2),
        DilithiumRing::MONT_R
    );
    let max = (DilithiumRing::Q as u64 - 1) * (DilithiumRing::Q as u64 - 1);
    assert!(montgomery_reduce::<DilithiumRing>(max) < DilithiumRing::Q);
}

#[test]
fn test_ntt_of_one_is_all_ones() {
    let mut one = P::zero();
    one.coeffs[0] = 1;
    one.ntt_inplace().unwrap();
    assert!(one.coeffs.iter().all(|&c| c == 1));
}

#[test]
fn test_ntt_linearity() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let a = random_poly(&mut rng);
    let b = random_poly(&mut rng);

    let mut sum = a.add(&b);
    sum.ntt_inplace().unwrap();

    let mut na = a.clone();
    let mut nb = b.clone();
    na.ntt_inplace().unwrap();
    nb.ntt_inplace().unwrap();

    assert_eq!(sum, na.add(&nb));
}

#[test]
fn test_ntt_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    for _ in 0..8 {
        let original = random_poly(&mut rng);
        let mut p = original.clone();
        p.ntt_inplace().unwrap();
        assert_ne!(p, original);
        p.from_ntt_inplace().unwrap();
        assert_eq!(p, original);
    }
}

#[test]
fn test_inv_ntt_tomont_leaves_montgomery_factor() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let original = random_poly(&mut rng);
    let mut p = original.clone();
    p.ntt_inplace().unwrap();
    p.inv_ntt_tomont_inplace().unwrap();
    assert_eq!(p, original.to_montgomery());
    for (got, want) in p.coeffs.iter().zip(original.coeffs.iter()) {
        assert_eq!(montgomery_reduce::<DilithiumRing>(*got as u64), *want);
    }
}

#[test]
fn test_ntt_mul_matches_schoolbook() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    for _ in 0..4 {
        let a = random_poly(&mut rng);
        let b = small_poly(&mut rng, 4);
        assert_eq!(a.ntt_mul(&b).unwrap(), a.schoolbook_mul(&b));
    }
}

#[test]
fn test_negacyclic_wrap() {
    // X^255 * X = X^256 = -1
    let mut a = P::zero();
    a.coeffs[255] = 1;
    let mut x = P::zero();
    x.coeffs[1] = 1;
    let prod = a.ntt_mul(&x).unwrap();
    let mut expected = P::zero();
    expected.coeffs[0] = DilithiumRing::Q - 1;
    assert_eq!(prod, expected);
}

#[test]
fn test_accumulated_pointwise_products() {
    // Sum of pointwise products is linear before the single inverse
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let (a0, a1) = (random_poly(&mut rng), random_poly(&mut rng));
    let (s0, s1) = (small_poly(&mut rng, 2), small_poly(&mut rng, 2));

    let expected = a0.schoolbook_mul(&s0).add(&a1.schoolbook_mul(&s1));

    let to_ntt = |p: &P| {
        let mut p = p.clone();
        p.ntt_inplace().unwrap();
        p
    };
    let mut acc = to_ntt(&a0).pointwise_montgomery(&to_ntt(&s0));
    acc += &to_ntt(&a1).pointwise_montgomery(&to_ntt(&s1));
    acc.inv_ntt_tomont_inplace().unwrap();

    assert_eq!(acc, expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ntt_roundtrip(seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let original = random_poly(&mut rng);
        let mut p = original.clone();
        p.ntt_inplace().unwrap();
        p.from_ntt_inplace().unwrap();
        prop_assert_eq!(p, original);
    }

    #[test]
    fn prop_montgomery_mul_canonical(a in 0u32..8380417, b in 0u32..8380417) {
        let r = montgomery_mul::<DilithiumRing>(a, b);
        prop_assert!(r < DilithiumRing::Q);
        // (a * b * R^-1) * R == a * b mod Q
        let back = r as u64 * DilithiumRing::MONT_R as u64 % DilithiumRing::Q as u64;
        prop_assert_eq!(back, a as u64 * b as u64 % DilithiumRing::Q as u64);
    }
}
