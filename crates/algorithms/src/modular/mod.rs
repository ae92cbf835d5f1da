//! Generic modular arithmetic over odd moduli
//!
//! This module implements the big-integer operations behind discrete-log
//! cryptography: an odd-modulus descriptor with precomputed Montgomery
//! constants, constant-time modular exponentiation, and fixed-width
//! element serialization.
//!
//! Design points, shared by every operation here:
//! - Elements are little-endian [`Limb`] slices of exactly
//!   [`Modulus::num_limbs`] limbs. Values produced by [`Modulus::mod_exp`]
//!   are in Montgomery form; [`Modulus::element_to_bytes`] converts back
//!   out while serializing.
//! - Working memory is always caller-provided scratch, sized by the pure
//!   functions in [`sizes`]. Nothing in this module allocates after
//!   modulus construction.
//! - Exponentiation is square-and-multiply-always over a declared bit
//!   count, with `subtle`-based limb selection: runtime and access
//!   pattern depend only on the bit count and the modulus width.

mod exp;
mod modulus;

pub mod encode;
pub mod sizes;

pub use modulus::Modulus;

/// Machine word used for big-integer limbs (little-endian order)
pub type Limb = u32;

/// Bytes per limb
pub const LIMB_BYTES: usize = 4;

/// Byte order for fixed-width element serialization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberFormat {
    /// Most-significant byte first (big-endian)
    MsbFirst,
    /// Least-significant byte first (little-endian)
    LsbFirst,
}

/// Side-channel posture for modular exponentiation
///
/// Constant-time processing is the only implemented posture; the marker
/// exists so the decision is explicit at every call site rather than an
/// implicit default inside the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpMode {
    /// Runtime and memory-access pattern independent of secret values
    #[default]
    ConstantTime,
}

/// Capability interface to a modular arithmetic engine
///
/// Callers that orchestrate modular computations depend on this trait
/// rather than on [`MontgomeryEngine`] directly, so they can be exercised
/// against substitute engines (for example one that forces a zero result).
pub trait ModularEngine {
    /// Compute `result := base^exponent mod m`
    ///
    /// Processes exactly `exponent_bits` bits of the little-endian
    /// `exponent`, most significant first; bits past the end of the slice
    /// read as zero. `base` and `result` are element-width slices;
    /// `scratch` must hold at least [`sizes::mod_exp_scratch_limbs`]
    /// limbs. The result is left in Montgomery form.
    fn mod_exp(
        &self,
        m: &Modulus,
        base: &[Limb],
        exponent: &[Limb],
        exponent_bits: u32,
        mode: ExpMode,
        result: &mut [Limb],
        scratch: &mut [Limb],
    ) -> crate::error::Result<()>;

    /// Whether an element is exactly zero (form-independent, constant time)
    fn is_zero(&self, m: &Modulus, element: &[Limb]) -> bool;

    /// Serialize an element into exactly `out.len()` bytes
    ///
    /// Converts out of Montgomery form using `scratch` (at least
    /// [`sizes::mod_op_scratch_limbs`] limbs) and writes the value in the
    /// requested format. Fails without writing if the value does not fit.
    fn element_to_bytes(
        &self,
        m: &Modulus,
        element: &[Limb],
        out: &mut [u8],
        format: NumberFormat,
        scratch: &mut [Limb],
    ) -> crate::error::Result<()>;
}

/// The production engine: Montgomery-form arithmetic on [`Modulus`]
#[derive(Clone, Copy, Debug, Default)]
pub struct MontgomeryEngine;

impl ModularEngine for MontgomeryEngine {
    fn mod_exp(
        &self,
        m: &Modulus,
        base: &[Limb],
        exponent: &[Limb],
        exponent_bits: u32,
        mode: ExpMode,
        result: &mut [Limb],
        scratch: &mut [Limb],
    ) -> crate::error::Result<()> {
        match mode {
            ExpMode::ConstantTime => m.mod_exp(base, exponent, exponent_bits, result, scratch),
        }
    }

    fn is_zero(&self, m: &Modulus, element: &[Limb]) -> bool {
        m.is_zero(element)
    }

    fn element_to_bytes(
        &self,
        m: &Modulus,
        element: &[Limb],
        out: &mut [u8],
        format: NumberFormat,
        scratch: &mut [Limb],
    ) -> crate::error::Result<()> {
        m.element_to_bytes(element, out, format, scratch)
    }
}
