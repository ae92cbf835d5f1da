//! End-to-end tests for finite-field Diffie-Hellman secret agreement

use dlcrypt_agreement::error::Error;
use dlcrypt_agreement::{
    agree, secret_agreement, secret_agreement_with_engine, AgreeFlags, DhGroup, DhKey,
    ExponentRange, NumberFormat,
};
use dlcrypt_algorithms::error::Result as PrimitiveResult;
use dlcrypt_algorithms::modular::{ExpMode, Limb, ModularEngine, Modulus, MontgomeryEngine};
use dlcrypt_api::{Error as CoreError, SerializeSecret};
use dlcrypt_tests::vectors;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn rfc5114_group() -> DhGroup {
    let p = hex::decode(vectors::P_1024).unwrap();
    let g = hex::decode(vectors::G_1024).unwrap();
    let q = hex::decode(vectors::Q_160).unwrap();
    DhGroup::from_params(&p, &g, Some(&q)).unwrap()
}

#[test]
fn test_small_group_exchange() {
    // P = 23, G = 5; x = 6 (Y_A = 8), y = 15 (Y_B = 19); both sides
    // derive 5^90 mod 23 = 2.
    let group = DhGroup::from_params(&[23], &[5], None).unwrap();
    let alice = DhKey::from_private_exponent(&group, &[6], ExponentRange::Full).unwrap();
    let bob = DhKey::from_private_exponent(&group, &[15], ExponentRange::Full).unwrap();
    let y_alice = DhKey::from_public_element(&group, &[8]).unwrap();
    let y_bob = DhKey::from_public_element(&group, &[19]).unwrap();

    for format in [NumberFormat::MsbFirst, NumberFormat::LsbFirst] {
        let mut a = [0u8; 1];
        let mut b = [0u8; 1];
        secret_agreement(&alice, &y_bob, format, AgreeFlags::NONE, &mut a).unwrap();
        secret_agreement(&bob, &y_alice, format, AgreeFlags::NONE, &mut b).unwrap();
        assert_eq!(a, [2]);
        assert_eq!(b, [2]);
    }
}

#[test]
fn test_rfc5114_known_answer_exchange() {
    let group = rfc5114_group();
    let terminal_x = hex::decode(vectors::TERMINAL_PRIVATE).unwrap();
    let chip_x = hex::decode(vectors::CHIP_PRIVATE).unwrap();
    let terminal_y = hex::decode(vectors::TERMINAL_PUBLIC).unwrap();
    let chip_y = hex::decode(vectors::CHIP_PUBLIC).unwrap();
    let expected = hex::decode(vectors::SHARED_SECRET).unwrap();

    let terminal =
        DhKey::from_private_exponent(&group, &terminal_x, ExponentRange::Subgroup { bits: 160 })
            .unwrap();
    let chip =
        DhKey::from_private_exponent(&group, &chip_x, ExponentRange::Subgroup { bits: 160 })
            .unwrap();
    let terminal_pub = DhKey::from_public_element(&group, &terminal_y).unwrap();
    let chip_pub = DhKey::from_public_element(&group, &chip_y).unwrap();

    assert_eq!(group.sizeof_public_key(), 128);

    let mut a = vec![0u8; 128];
    let mut b = vec![0u8; 128];
    secret_agreement(&terminal, &chip_pub, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut a)
        .unwrap();
    secret_agreement(&chip, &terminal_pub, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut b)
        .unwrap();
    assert_eq!(a, expected);
    assert_eq!(b, expected);

    // LsbFirst is the byte reversal of MsbFirst
    let mut le = vec![0u8; 128];
    secret_agreement(&terminal, &chip_pub, NumberFormat::LsbFirst, AgreeFlags::NONE, &mut le)
        .unwrap();
    let reversed: Vec<u8> = expected.iter().rev().copied().collect();
    assert_eq!(le, reversed);
}

#[test]
fn test_full_width_processing_matches_reduced() {
    // The same exponent imported as a full-range key (processed with the
    // bit length of P) must derive the same secret as the 160-bit form.
    let group = rfc5114_group();
    let terminal_x = hex::decode(vectors::TERMINAL_PRIVATE).unwrap();
    let chip_y = hex::decode(vectors::CHIP_PUBLIC).unwrap();
    let expected = hex::decode(vectors::SHARED_SECRET).unwrap();

    let reduced =
        DhKey::from_private_exponent(&group, &terminal_x, ExponentRange::Subgroup { bits: 160 })
            .unwrap();
    let full = DhKey::from_private_exponent(&group, &terminal_x, ExponentRange::Full).unwrap();
    assert_eq!(reduced.exponent_bit_len(), 160);
    assert_eq!(full.exponent_bit_len(), 1024);

    let chip_pub = DhKey::from_public_element(&group, &chip_y).unwrap();
    let a = agree(&reduced, &chip_pub, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
    let b = agree(&full, &chip_pub, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
    assert_eq!(*a.to_bytes_zeroizing(), expected);
    assert_eq!(*b.to_bytes_zeroizing(), expected);
}

#[test]
fn test_agreement_is_deterministic() {
    let group = rfc5114_group();
    let x = hex::decode(vectors::TERMINAL_PRIVATE).unwrap();
    let y = hex::decode(vectors::CHIP_PUBLIC).unwrap();
    let private =
        DhKey::from_private_exponent(&group, &x, ExponentRange::Subgroup { bits: 160 }).unwrap();
    let peer = DhKey::from_public_element(&group, &y).unwrap();

    let first = agree(&private, &peer, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
    let second = agree(&private, &peer, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
    assert_eq!(*first.to_bytes_zeroizing(), *second.to_bytes_zeroizing());
}

#[test]
fn test_symmetry_with_random_exponents() {
    // Both parties derive G^(xy) regardless of which side runs the
    // operation. Publics are produced with the agreement primitive itself
    // (base G), since key generation is out of scope.
    let p = 0x1FFF_FFFF_FFFF_FFFFu64; // 2^61 - 1
    let group = DhGroup::from_params(&p.to_be_bytes(), &[3], None).unwrap();
    let g_pub = DhKey::from_public_element(&group, &[3]).unwrap();

    let mut rng = ChaCha20Rng::seed_from_u64(0xD1FF1E);
    for _ in 0..20 {
        let mut xb = [0u8; 7];
        let mut yb = [0u8; 7];
        rng.fill_bytes(&mut xb);
        rng.fill_bytes(&mut yb);
        xb[6] |= 1;
        yb[6] |= 1;

        let x = DhKey::from_private_exponent(&group, &xb, ExponentRange::Full).unwrap();
        let y = DhKey::from_private_exponent(&group, &yb, ExponentRange::Full).unwrap();

        let y_x = agree(&x, &g_pub, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
        let y_y = agree(&y, &g_pub, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();

        let y_x_pub = DhKey::from_public_element(&group, &y_x.to_bytes_zeroizing()).unwrap();
        let y_y_pub = DhKey::from_public_element(&group, &y_y.to_bytes_zeroizing()).unwrap();

        let s_a = agree(&x, &y_y_pub, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
        let s_b = agree(&y, &y_x_pub, NumberFormat::MsbFirst, AgreeFlags::NONE).unwrap();
        assert_eq!(*s_a.to_bytes_zeroizing(), *s_b.to_bytes_zeroizing());
    }
}

#[test]
fn test_zero_public_value_is_importable_but_result_is_rejected() {
    let group = rfc5114_group();
    let x = hex::decode(vectors::TERMINAL_PRIVATE).unwrap();
    let private =
        DhKey::from_private_exponent(&group, &x, ExponentRange::Subgroup { bits: 160 }).unwrap();
    let zero = DhKey::from_public_element(&group, &[0]).unwrap();

    let mut out = vec![0xAAu8; 128];
    let err = secret_agreement(&private, &zero, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut out);
    assert_eq!(err, Err(Error::DegenerateSecret));
    assert!(out.iter().all(|&b| b == 0xAA), "output must stay untouched");
}

#[test]
fn test_validation_failures_and_their_order() {
    let group = rfc5114_group();
    let small = DhGroup::from_params(&[23], &[5], None).unwrap();
    let x = hex::decode(vectors::TERMINAL_PRIVATE).unwrap();
    let y = hex::decode(vectors::CHIP_PUBLIC).unwrap();
    let private =
        DhKey::from_private_exponent(&group, &x, ExponentRange::Subgroup { bits: 160 }).unwrap();
    let peer = DhKey::from_public_element(&group, &y).unwrap();
    let mut out = vec![0u8; 128];

    // reserved flags
    let err = secret_agreement(
        &private,
        &peer,
        NumberFormat::MsbFirst,
        AgreeFlags::from_bits(0x4),
        &mut out,
    );
    assert_eq!(err, Err(Error::UnsupportedFlags { flags: 0x4 }));

    // missing private component
    let err = secret_agreement(&peer, &peer, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut out);
    assert_eq!(err, Err(Error::MissingPrivateKey));

    // mismatched groups, reported even with a wrongly-sized buffer
    let other_peer = DhKey::from_public_element(&small, &[19]).unwrap();
    let mut tiny = [0u8; 3];
    let err = secret_agreement(
        &private,
        &other_peer,
        NumberFormat::MsbFirst,
        AgreeFlags::NONE,
        &mut tiny,
    );
    assert_eq!(err, Err(Error::GroupMismatch));

    // output off by one, both directions
    let mut short = vec![0u8; 127];
    let err = secret_agreement(&private, &peer, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut short);
    assert_eq!(
        err,
        Err(Error::WrongOutputSize {
            expected: 128,
            actual: 127
        })
    );
    let mut long = vec![0u8; 129];
    let err = secret_agreement(&private, &peer, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut long);
    assert_eq!(
        err,
        Err(Error::WrongOutputSize {
            expected: 128,
            actual: 129
        })
    );

    // exact length still works
    secret_agreement(&private, &peer, NumberFormat::MsbFirst, AgreeFlags::NONE, &mut out).unwrap();
}

/// Engine whose exponentiation always produces the zero element
struct ZeroResultEngine;

impl ModularEngine for ZeroResultEngine {
    fn mod_exp(
        &self,
        _m: &Modulus,
        _base: &[Limb],
        _exponent: &[Limb],
        _exponent_bits: u32,
        _mode: ExpMode,
        result: &mut [Limb],
        _scratch: &mut [Limb],
    ) -> PrimitiveResult<()> {
        for w in result.iter_mut() {
            *w = 0;
        }
        Ok(())
    }

    fn is_zero(&self, m: &Modulus, element: &[Limb]) -> bool {
        MontgomeryEngine.is_zero(m, element)
    }

    fn element_to_bytes(
        &self,
        m: &Modulus,
        element: &[Limb],
        out: &mut [u8],
        format: NumberFormat,
        scratch: &mut [Limb],
    ) -> PrimitiveResult<()> {
        MontgomeryEngine.element_to_bytes(m, element, out, format, scratch)
    }
}

#[test]
fn test_engine_seam_supports_forced_zero_result() {
    let group = DhGroup::from_params(&[23], &[5], None).unwrap();
    let private = DhKey::from_private_exponent(&group, &[6], ExponentRange::Full).unwrap();
    let peer = DhKey::from_public_element(&group, &[19]).unwrap();

    let mut out = [0x55u8; 1];
    let err = secret_agreement_with_engine(
        &ZeroResultEngine,
        &private,
        &peer,
        NumberFormat::MsbFirst,
        AgreeFlags::NONE,
        &mut out,
    );
    assert_eq!(err, Err(Error::DegenerateSecret));
    assert_eq!(out, [0x55]);
}

#[test]
fn test_errors_fold_into_the_library_taxonomy() {
    let cases: [(Error, fn(&CoreError) -> bool); 5] = [
        (Error::UnsupportedFlags { flags: 1 }, |e| {
            matches!(e, CoreError::InvalidParameter { .. })
        }),
        (Error::GroupMismatch, |e| {
            matches!(e, CoreError::InvalidParameter { .. })
        }),
        (
            Error::WrongOutputSize {
                expected: 128,
                actual: 127,
            },
            |e| matches!(e, CoreError::InvalidLength { .. }),
        ),
        (Error::ScratchAllocation { bytes: 1 }, |e| {
            matches!(e, CoreError::AllocationFailed { .. })
        }),
        (Error::DegenerateSecret, |e| {
            matches!(e, CoreError::InvalidDerivedValue { .. })
        }),
    ];
    for (err, check) in cases {
        let core = CoreError::from(err.clone());
        assert!(check(&core), "wrong mapping for {:?}", err);
    }
}
