//! Fixed round-3.1 vectors for key generation and deterministic signing
//!
//! Seed is bytes 0x00..0x1f. Large buffers are compared through their
//! 32-byte SHAKE256 digest; since `tr` is that same digest of the public
//! key, the public key digest doubles as the expected `tr`.

use algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use api::{Signature, SignatureDerive, SignatureSerialize};
use pqsig_sign::{category, Dilithium2, Dilithium3, Dilithium5, SecurityCategory};

const SEED: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

const MESSAGE: &[u8] = b"Test message for Dilithium signature";

/// rho is the same for every category: the seed expansion is not domain separated
const RHO: &str = "69f07c8840ce80024db30939882c3d5bbc9c98b3e31e4513ebd2ca9b4503cdd3";

struct KnownAnswer {
    category: SecurityCategory,
    pk_digest: &'static str,
    sk_digest: &'static str,
    c_tilde: &'static str,
    sig_digest: &'static str,
    hint_counters: &'static [u8],
}

const DILITHIUM2: KnownAnswer = KnownAnswer {
    category: SecurityCategory::Two,
    pk_digest: "8522a0b08e82b4e7ca1480f7e21cb144a9b7ab01d5fb648f9deb127e637692c0",
    sk_digest: "3f8fd5d916d6168653c2fda51ed55ddc4f50bf6cd0c9a3e2630afebcf0bab31b",
    c_tilde: "c65d08de1ff44c0a9c66cb6cb0b1e1f2303e339f89ad9bf940ce8084a6b3b26e",
    sig_digest: "31d7d32c60492f867b71970dbb92506542c3d96f16cd4e401ec840f090b140fa",
    hint_counters: &[14, 27, 39, 60],
};

const DILITHIUM3: KnownAnswer = KnownAnswer {
    category: SecurityCategory::Three,
    pk_digest: "561d4f1572fa8d7434d604252888a00f9b5c310b864cca83cce72b6d0cd96141",
    sk_digest: "bac7c256a59df612c68219a727cf974284879e923b1614b5bcf4a0076c606340",
    c_tilde: "c2eebda4be680f90480a24d89c54be32803527250811ba06e59fb849b438fac0",
    sig_digest: "6d41022fba9b731dbdd2c961f5cb1c9e161e087a85683441468316347e3c8a96",
    hint_counters: &[6, 9, 19, 25, 31, 38],
};

const DILITHIUM5: KnownAnswer = KnownAnswer {
    category: SecurityCategory::Five,
    pk_digest: "3668d081fc726c0986cb496c3525f833bc127afbf8bcedad0c694e3a9ae1f3de",
    sk_digest: "0ce92224b9cfd2a917cb5490a6f90da50b65c8940ce998b5085e213b6d2d2ff8",
    c_tilde: "baa1553725ec6caad1ecc300209d0ebfb70ea3cb4e816be3079ddd41fa79723b",
    sig_digest: "e9b7c8ad2bca765b1d254314c328cf1043398e6e5fd7c46170f0a1b700278948",
    hint_counters: &[4, 12, 20, 23, 29, 37, 39, 44],
};

fn digest(bytes: &[u8]) -> String {
    hex::encode(ShakeXof256::generate(bytes, 32).unwrap())
}

fn check<S>(kat: &KnownAnswer)
where
    S: Signature + SignatureSerialize + SignatureDerive,
{
    let seed = hex::decode(SEED).unwrap();
    let keypair = S::derive_keypair(&seed).unwrap();
    let pk = S::serialize_public_key(&S::public_key(&keypair));
    let sk = S::serialize_secret_key(&S::secret_key(&keypair));

    assert_eq!(hex::encode(&pk[..32]), RHO, "{}: rho", S::name());
    assert_eq!(digest(&pk), kat.pk_digest, "{}: public key", S::name());
    assert_eq!(hex::encode(&sk[..32]), RHO, "{}: secret key rho", S::name());
    assert_eq!(hex::encode(&sk[64..96]), kat.pk_digest, "{}: tr", S::name());
    assert_eq!(digest(&sk), kat.sk_digest, "{}: secret key", S::name());

    let sig = S::serialize_signature(&S::sign(MESSAGE, &S::secret_key(&keypair)).unwrap());
    assert_eq!(hex::encode(&sig[..32]), kat.c_tilde, "{}: c_tilde", S::name());
    assert_eq!(
        &sig[sig.len() - kat.hint_counters.len()..],
        kat.hint_counters,
        "{}: hint counters",
        S::name()
    );
    assert_eq!(digest(&sig), kat.sig_digest, "{}: signature", S::name());

    // The byte-level boundary produces and accepts the same bytes
    assert_eq!(category::sign(kat.category, MESSAGE, &sk).unwrap(), sig);
    assert!(category::verify(kat.category, MESSAGE, &sig, &pk).unwrap());
}

#[test]
fn dilithium2_known_answer() {
    check::<Dilithium2>(&DILITHIUM2);
}

#[test]
fn dilithium3_known_answer() {
    check::<Dilithium3>(&DILITHIUM3);
}

#[test]
fn dilithium5_known_answer() {
    check::<Dilithium5>(&DILITHIUM5);
}
