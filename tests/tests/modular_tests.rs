//! Cross-checks of the modular arithmetic engine against reference
//! arithmetic on word-sized moduli

use dlcrypt_algorithms::modular::{encode, sizes, Limb, Modulus, NumberFormat};
use proptest::prelude::*;

/// Reference square-and-multiply (moduli up to 64 bits)
fn naive_modpow(mut base: u128, mut exp: u128, m: u128) -> u128 {
    let mut result = 1u128 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    result
}

/// Drive the engine end to end and return the result as a u64
fn engine_modpow(m: &Modulus, base: u64, exp: u64) -> u64 {
    let n = m.num_limbs();
    let base_l = encode::limbs_from_be_bytes_fixed(&base.to_be_bytes(), n).unwrap();
    let exp_l = encode::limbs_from_be_bytes(&exp.to_be_bytes());
    let mut result = vec![0 as Limb; n];
    let mut scratch = vec![0 as Limb; sizes::mod_exp_scratch_limbs(n).unwrap()];
    m.mod_exp(&base_l, &exp_l, 64, &mut result, &mut scratch)
        .unwrap();

    let mut out = [0u8; 8];
    let mut scratch = vec![0 as Limb; sizes::mod_op_scratch_limbs(n).unwrap()];
    m.element_to_bytes(&result, &mut out, NumberFormat::MsbFirst, &mut scratch)
        .unwrap();
    u64::from_be_bytes(out)
}

proptest! {
    #[test]
    fn prop_mod_exp_matches_reference(p0 in any::<u64>(), base in any::<u64>(), exp in any::<u64>()) {
        let p = p0 | 1 | (1 << 63);
        let base = base % p;
        let m = Modulus::from_be_bytes(&p.to_be_bytes()).unwrap();
        let expected = naive_modpow(base as u128, exp as u128, p as u128) as u64;
        prop_assert_eq!(engine_modpow(&m, base, exp), expected);
    }

    #[test]
    fn prop_mod_exp_is_deterministic(p0 in any::<u64>(), base in any::<u64>(), exp in any::<u64>()) {
        let p = p0 | 1 | (1 << 63);
        let base = base % p;
        let m = Modulus::from_be_bytes(&p.to_be_bytes()).unwrap();
        prop_assert_eq!(engine_modpow(&m, base, exp), engine_modpow(&m, base, exp));
    }

    #[test]
    fn prop_exponentiation_commutes(p0 in any::<u64>(), g in any::<u64>(), x in any::<u64>(), y in any::<u64>()) {
        // (g^x)^y == (g^y)^x mod p — the property behind agreement symmetry
        let p = p0 | 1 | (1 << 63);
        let g = g % p;
        let m = Modulus::from_be_bytes(&p.to_be_bytes()).unwrap();
        let gx = engine_modpow(&m, g, x);
        let gy = engine_modpow(&m, g, y);
        prop_assert_eq!(engine_modpow(&m, gx, y), engine_modpow(&m, gy, x));
    }
}
