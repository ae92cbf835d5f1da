// File: crates/agreement/src/dh/mod.rs

//! Finite-field Diffie-Hellman secret agreement
//!
//! Given one party's private exponent x and the other party's public
//! group element Y, [`secret_agreement`] computes the shared secret
//! `S = Y^x mod P`, serializes it into a caller-provided buffer in the
//! requested byte order, and guarantees that every secret-bearing
//! intermediate is wiped before the call returns — on the success path
//! and on every failure path alike.
//!
//! All working memory for one call is a single [`ScratchArena`]
//! allocation, sized exactly as one result element plus the larger of the
//! exponentiation and serialization working sets (the two phases run
//! sequentially and share the trailing region). The exponentiation runs
//! in constant time with respect to the private exponent.
//!
//! # Public key validation
//!
//! The peer's public value is checked only for shape: it must parse and
//! be reduced modulo P. It is deliberately **not** checked against the
//! degenerate values 0, 1 and P−1, or for membership in the subgroup
//! generated by G. Rejecting those values would help only a protocol
//! that authenticates the derived secret while leaving the public key
//! unauthenticated — and in such a protocol an active attacker can
//! substitute a well-formed key of their own choosing anyway, so the
//! check closes no real attack path. What it would do is reject inputs
//! that interoperating implementations have always accepted. The check
//! is therefore omitted on compatibility grounds, as a considered
//! decision; implementations layered on this crate should not reintroduce
//! it here. The one defensive output check this operation performs is the
//! rejection of an exactly-zero shared secret ([`Error::DegenerateSecret`]).
//!
//! Trust in the group parameters (P prime, G of the right order) is
//! likewise a protocol-layer concern: parameters are validated for shape
//! at [`DhGroup::from_params`] and never re-validated per exchange.

mod group;
mod key;

pub use group::DhGroup;
pub use key::{DhKey, ExponentRange, PrivateExponent};

use alloc::vec::Vec;
use core::fmt;

use dlcrypt_algorithms::error::Error as PrimitiveError;
use dlcrypt_algorithms::modular::{
    sizes, ExpMode, Limb, ModularEngine, MontgomeryEngine, NumberFormat, LIMB_BYTES,
};
use dlcrypt_api::SerializeSecret;
use dlcrypt_common::security::{ScratchArena, SecretVec};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Flags for [`secret_agreement`]
///
/// Every bit is reserved for future extension; the only value accepted
/// today is [`AgreeFlags::NONE`], and any other value fails with
/// [`Error::UnsupportedFlags`] before any computation happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgreeFlags(u32);

impl AgreeFlags {
    /// The empty flag set — the only legal value
    pub const NONE: Self = Self(0);

    /// Reconstitute a flag set from raw bits
    ///
    /// Reserved bits are rejected by the operation, not here.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bit value
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether no flag bit is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// An agreed shared secret, zeroized on drop
///
/// There is intentionally no `AsRef<[u8]>`; callers export the bytes via
/// [`SerializeSecret::to_bytes_zeroizing`] so every copy inherits the
/// zeroize-on-drop discipline.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DhSharedSecret(SecretVec);

impl DhSharedSecret {
    /// Byte length of the secret
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl SerializeSecret for DhSharedSecret {
    fn from_bytes(bytes: &[u8]) -> dlcrypt_api::Result<Self> {
        Ok(Self(SecretVec::from_slice(bytes)))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.as_slice().to_vec())
    }
}

impl fmt::Debug for DhSharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DhSharedSecret(len={}, [REDACTED])", self.0.len())
    }
}

/// Compute the Diffie-Hellman shared secret into a caller-provided buffer
///
/// `private` must carry a private exponent — this operation never derives
/// one. `public` supplies the peer's element, and both keys must belong
/// to the same group. `agreed_secret` must be exactly
/// [`DhGroup::sizeof_public_key`] bytes long: the secret occupies the
/// same fixed-width encoding as a public key of the group, and both
/// shorter and longer buffers are rejected.
///
/// On success the buffer holds the serialized secret; on failure it is
/// left untouched. Scratch memory is one allocation, wiped in its
/// entirety before release on every path past the allocation.
pub fn secret_agreement(
    private: &DhKey<'_>,
    public: &DhKey<'_>,
    format: NumberFormat,
    flags: AgreeFlags,
    agreed_secret: &mut [u8],
) -> Result<()> {
    secret_agreement_with_engine(&MontgomeryEngine, private, public, format, flags, agreed_secret)
}

/// [`secret_agreement`] against a caller-chosen arithmetic engine
///
/// The agreement logic depends only on the [`ModularEngine`] capability
/// interface, so tests can substitute engines (for example one forced to
/// produce a zero result).
pub fn secret_agreement_with_engine<E: ModularEngine>(
    engine: &E,
    private: &DhKey<'_>,
    public: &DhKey<'_>,
    format: NumberFormat,
    flags: AgreeFlags,
    agreed_secret: &mut [u8],
) -> Result<()> {
    // Only the empty flag set is defined today.
    if !flags.is_empty() {
        return Err(Error::UnsupportedFlags {
            flags: flags.bits(),
        });
    }
    // The caller supplies their own private exponent.
    let exponent = private.private_exponent().ok_or(Error::MissingPrivateKey)?;
    // Both keys must denote the same group; it becomes the operation's group.
    if !private.group().is_same(public.group()) {
        return Err(Error::GroupMismatch);
    }
    let group = private.group();
    let peer = public.public_element().ok_or(Error::InvalidKey {
        key_type: "public",
        reason: "key has no public element",
    })?;
    // The secret uses the same fixed-width encoding as a public key;
    // strict equality, not an upper bound.
    let expected = group.sizeof_public_key();
    if agreed_secret.len() != expected {
        return Err(Error::WrongOutputSize {
            expected,
            actual: agreed_secret.len(),
        });
    }

    let modulus = group.modulus();
    let n = modulus.num_limbs();

    // One allocation: the result element plus the larger of the two
    // working sets. Exponentiation and serialization run sequentially and
    // share the trailing region.
    let overflow = Error::Primitive(PrimitiveError::Overflow {
        context: "secret_agreement scratch size",
    });
    let exp_work = sizes::mod_exp_scratch_limbs(n).ok_or_else(|| overflow.clone())?;
    let op_work = sizes::mod_op_scratch_limbs(n).ok_or_else(|| overflow.clone())?;
    let total = n.checked_add(exp_work.max(op_work)).ok_or(overflow)?;

    let mut arena: ScratchArena<Limb> = ScratchArena::new(total).map_err(|_| {
        Error::ScratchAllocation {
            bytes: total.saturating_mul(LIMB_BYTES),
        }
    })?;
    // From here on the arena wipes its whole buffer when it goes out of
    // scope, on every return below.
    let (result, work) = arena.as_mut_slice().split_at_mut(n);

    // A reduced exponent is processed with its declared width, a
    // full-range one with the bit length of P.
    let exponent_bits = private.exponent_bit_len();

    // Constant-time processing is this operation's only side-channel
    // posture decision; no blinding or other countermeasure options are
    // taken.
    engine.mod_exp(
        modulus,
        peer,
        exponent.limbs(),
        exponent_bits,
        ExpMode::ConstantTime,
        result,
        work,
    )?;

    // The one defensive check on the output: an exactly-zero secret is
    // rejected. Any other value is accepted as-is.
    if engine.is_zero(modulus, result) {
        return Err(Error::DegenerateSecret);
    }

    engine.element_to_bytes(modulus, result, agreed_secret, format, work)?;
    Ok(())
}

/// Compute the shared secret into an owned, zeroize-on-drop container
///
/// Convenience form of [`secret_agreement`] that allocates the
/// exact-width output itself.
pub fn agree(
    private: &DhKey<'_>,
    public: &DhKey<'_>,
    format: NumberFormat,
    flags: AgreeFlags,
) -> Result<DhSharedSecret> {
    let mut out = SecretVec::zeroed(private.group().sizeof_public_key());
    secret_agreement(private, public, format, flags, out.as_mut_slice())?;
    Ok(DhSharedSecret(out))
}
