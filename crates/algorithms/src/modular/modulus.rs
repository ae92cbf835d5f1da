//! Odd-modulus descriptor with precomputed Montgomery constants

use alloc::vec::Vec;

use dlcrypt_internal::constant_time::ct_assign_limbs;
use dlcrypt_internal::endian::bit_len;
use subtle::Choice;

use crate::error::{Error, Result};

use super::encode::limbs_from_be_bytes;
use super::{Limb, LIMB_BYTES};

/// An odd modulus m ≥ 3 with precomputed Montgomery constants
///
/// With `n = num_limbs()` and `R = 2^(32·n)`, the descriptor carries
/// `-m⁻¹ mod 2³²`, `R mod m` and `R² mod m`, which together drive
/// Montgomery multiplication and the conversions in and out of Montgomery
/// form. Construction is the only allocating step; all later operations
/// work in caller-provided scratch.
///
/// Equality is value equality of the modulus itself.
#[derive(Clone, Debug)]
pub struct Modulus {
    /// Little-endian limbs, top limb nonzero
    limbs: Vec<Limb>,
    /// Exact bit length of m
    bits: u32,
    /// -m⁻¹ mod 2³²
    n0_inv: Limb,
    /// R mod m (the Montgomery representation of 1)
    r1: Vec<Limb>,
    /// R² mod m (the to-Montgomery conversion factor)
    r2: Vec<Limb>,
}

impl PartialEq for Modulus {
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs
    }
}

impl Eq for Modulus {}

impl Modulus {
    /// Parse a modulus from its big-endian byte encoding
    ///
    /// The value must be odd and at least 3; Montgomery arithmetic is
    /// undefined for even moduli.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        let limbs = limbs_from_be_bytes(bytes);
        let bits = bit_len(&limbs);
        if bits < 2 {
            return Err(Error::Parameter {
                name: "modulus",
                reason: "must be at least 3",
            });
        }
        if limbs[0] & 1 == 0 {
            return Err(Error::Parameter {
                name: "modulus",
                reason: "must be odd",
            });
        }

        let n = limbs.len();
        let n0_inv = mont_word_inv(limbs[0]);

        // R mod m by doubling 1 once per modulus bit position, then
        // R² mod m by doubling as far again.
        let mut tmp: Vec<Limb> = core::iter::repeat(0).take(n).collect();
        let mut r1: Vec<Limb> = core::iter::repeat(0).take(n).collect();
        r1[0] = 1;
        for _ in 0..(32 * n) {
            double_mod(&mut r1, &limbs, &mut tmp);
        }
        let mut r2 = r1.clone();
        for _ in 0..(32 * n) {
            double_mod(&mut r2, &limbs, &mut tmp);
        }

        Ok(Self {
            limbs,
            bits,
            n0_inv,
            r1,
            r2,
        })
    }

    /// Exact bit length of the modulus
    #[inline(always)]
    pub fn bit_len(&self) -> u32 {
        self.bits
    }

    /// Number of limbs in an element bound to this modulus
    #[inline(always)]
    pub fn num_limbs(&self) -> usize {
        self.limbs.len()
    }

    /// Storage size in bytes of one element bound to this modulus
    #[inline(always)]
    pub fn element_size(&self) -> usize {
        self.limbs.len() * LIMB_BYTES
    }

    /// Tight byte length of the modulus (`ceil(bits / 8)`)
    ///
    /// This is the serialized width of a reduced value, and therefore the
    /// wire size of public keys and agreed secrets in a group using this
    /// modulus.
    #[inline(always)]
    pub fn byte_len(&self) -> usize {
        ((self.bits + 7) / 8) as usize
    }

    /// The modulus value as little-endian limbs
    #[inline(always)]
    pub fn as_limbs(&self) -> &[Limb] {
        &self.limbs
    }

    #[inline(always)]
    pub(crate) fn n0_inv(&self) -> Limb {
        self.n0_inv
    }

    #[inline(always)]
    pub(crate) fn r1(&self) -> &[Limb] {
        &self.r1
    }

    #[inline(always)]
    pub(crate) fn r2(&self) -> &[Limb] {
        &self.r2
    }
}

/* ========================================================================== */
/*  Limb helpers                                                              */
/* ========================================================================== */

/// out = a - b over equal-length little-endian limbs; returns the borrow (0/1)
pub(crate) fn sub_limbs(out: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert_eq!(out.len(), a.len());
    debug_assert_eq!(a.len(), b.len());
    let mut borrow: i64 = 0;
    for i in 0..a.len() {
        let t = a[i] as i64 - b[i] as i64 - borrow;
        out[i] = t as u32;
        borrow = (t >> 63) & 1;
    }
    borrow as Limb
}

/// x := 2x mod m, constant time; requires x < m
///
/// `tmp` is same-width scratch for the trial subtraction.
fn double_mod(x: &mut [Limb], m: &[Limb], tmp: &mut [Limb]) {
    let n = x.len();
    let mut carry: Limb = 0;
    for i in 0..n {
        let w = x[i];
        x[i] = (w << 1) | carry;
        carry = w >> 31;
    }
    // 2x < 2m, so one conditional subtraction suffices. Subtract when the
    // shift overflowed the limb width or when the shifted value is >= m.
    let borrow = sub_limbs(tmp, x, m);
    let need_sub = Choice::from((carry | (1 - borrow)) as u8);
    ct_assign_limbs(x, tmp, need_sub);
}

/// -m0⁻¹ mod 2³² for odd m0, by Newton iteration
///
/// m0·m0 ≡ 1 (mod 8) for any odd m0, so m0 is its own inverse to three
/// bits; each iteration doubles the number of correct bits.
fn mont_word_inv(m0: Limb) -> Limb {
    let mut inv = m0;
    for _ in 0..4 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(m0.wrapping_mul(inv)));
    }
    inv.wrapping_neg()
}
