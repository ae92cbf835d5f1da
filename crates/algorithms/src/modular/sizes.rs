//! Scratch-size computation for modular operations
//!
//! Pure functions of the modulus limb count. Each is exact for the engine
//! in this crate and monotone nondecreasing in `n`; callers sizing a
//! shared buffer for several operations take the maximum of the relevant
//! results. All arithmetic is overflow-checked: `None` means the request
//! cannot be represented, never a wrapped value — so a successful result
//! is always a safe (never under-estimated) budget.

use super::LIMB_BYTES;

/// Limbs of working memory required by `mod_exp` for an `n`-limb modulus
///
/// The layout is three element-width temporaries (Montgomery base, the
/// running square, the multiply result) plus the `n + 2` limb CIOS
/// accumulator: `4n + 2`.
pub fn mod_exp_scratch_limbs(n: usize) -> Option<usize> {
    n.checked_mul(4)?.checked_add(2)
}

/// Limbs of working memory required by single-operand modular operations
/// (element serialization) for an `n`-limb modulus
///
/// Two element-width temporaries (the standard-form value and the unit
/// operand) plus the CIOS accumulator: `3n + 2`.
pub fn mod_op_scratch_limbs(n: usize) -> Option<usize> {
    n.checked_mul(3)?.checked_add(2)
}

/// Byte-valued form of [`mod_exp_scratch_limbs`]
pub fn mod_exp_scratch_bytes(n: usize) -> Option<usize> {
    mod_exp_scratch_limbs(n)?.checked_mul(LIMB_BYTES)
}

/// Byte-valued form of [`mod_op_scratch_limbs`]
pub fn mod_op_scratch_bytes(n: usize) -> Option<usize> {
    mod_op_scratch_limbs(n)?.checked_mul(LIMB_BYTES)
}
