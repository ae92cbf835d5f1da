//! Constant-time operations on little-endian limb values
//!
//! All functions in this module run in time independent of the limb
//! *values*; control flow may depend on slice lengths and bit counts,
//! which reflect storage widths rather than secrets.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time selection of a limb
///
/// Returns `a` if `choice` is 0, `b` if `choice` is 1.
#[inline(always)]
pub fn ct_select_limb(a: u32, b: u32, choice: Choice) -> u32 {
    u32::conditional_select(&a, &b, choice)
}

/// Constant-time conditional assignment over a limb slice
///
/// Sets `dst[i] = src[i]` for every index if `choice` is 1, otherwise
/// leaves `dst` unchanged. Both slices must have the same length.
pub fn ct_assign_limbs(dst: &mut [u32], src: &[u32], choice: Choice) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = u32::conditional_select(d, s, choice);
    }
}

/// Constant-time zero test: `Choice(1)` iff every limb is zero
pub fn ct_limbs_zero(limbs: &[u32]) -> Choice {
    let mut acc = 0u32;
    for &w in limbs {
        acc |= w;
    }
    acc.ct_eq(&0)
}

/// Constant-time equality of two equal-length limb slices
///
/// Slices of different lengths compare unequal without inspecting values.
pub fn ct_limbs_eq(a: &[u32], b: &[u32]) -> Choice {
    if a.len() != b.len() {
        return Choice::from(0u8);
    }
    a.ct_eq(b)
}

/// Constant-time less-than: `Choice(1)` iff `a < b`
///
/// Both operands are little-endian limb values of the same length; the
/// result is the borrow out of the subtraction `a - b`.
pub fn ct_limbs_lt(a: &[u32], b: &[u32]) -> Choice {
    debug_assert_eq!(a.len(), b.len());
    let mut borrow = 0u64;
    for i in 0..a.len() {
        let d = (a[i] as u64)
            .wrapping_sub(b[i] as u64)
            .wrapping_sub(borrow);
        borrow = (d >> 63) & 1;
    }
    Choice::from(borrow as u8)
}

/// Constant-time width check: `Choice(1)` iff the value fits in `bits` bits
///
/// Folds every bit at position `bits` and above into an accumulator; the
/// branch structure depends only on the slice length and `bits`.
pub fn ct_fits_bits(limbs: &[u32], bits: u32) -> Choice {
    let mut acc = 0u32;
    for (i, &w) in limbs.iter().enumerate() {
        let limb_base = (i as u32) * 32;
        if limb_base >= bits {
            acc |= w;
        } else {
            let in_limb = bits - limb_base;
            if in_limb < 32 {
                acc |= w >> in_limb;
            }
        }
    }
    acc.ct_eq(&0)
}
