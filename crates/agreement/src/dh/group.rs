// File: crates/agreement/src/dh/group.rs

//! Discrete-log group descriptors

use alloc::vec::Vec;

use dlcrypt_algorithms::modular::{encode, Limb, Modulus};

use crate::error::{Error, Result};

/// An immutable finite-cyclic-group descriptor: modulus P, generator G,
/// and optionally the subgroup order Q
///
/// Two descriptors denote the same group iff (P, G, Q) are equal by
/// value; [`DhGroup::is_same`] also short-circuits on reference identity.
/// Construction validates shape only — P odd and at least 3, 1 ≤ G < P,
/// 0 < Q < P. Whether the parameters are trustworthy (P prime, G of
/// order Q) is a protocol-layer decision that is deliberately not
/// re-checked per exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DhGroup {
    modulus: Modulus,
    generator: Vec<Limb>,
    order: Option<Vec<Limb>>,
}

impl DhGroup {
    /// Build a group from big-endian parameter encodings
    pub fn from_params(p: &[u8], g: &[u8], q: Option<&[u8]>) -> Result<Self> {
        let modulus = Modulus::from_be_bytes(p)?;

        let generator = encode::limbs_from_be_bytes(g);
        if is_zero_value(&generator) || !value_lt(&generator, modulus.as_limbs()) {
            return Err(Error::InvalidGroup {
                reason: "generator out of range",
            });
        }

        let order = match q {
            Some(q_bytes) => {
                let order = encode::limbs_from_be_bytes(q_bytes);
                if is_zero_value(&order) || !value_lt(&order, modulus.as_limbs()) {
                    return Err(Error::InvalidGroup {
                        reason: "subgroup order out of range",
                    });
                }
                Some(order)
            }
            None => None,
        };

        Ok(Self {
            modulus,
            generator,
            order,
        })
    }

    /// The modulus P
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// The generator G, as little-endian limbs
    pub fn generator(&self) -> &[Limb] {
        &self.generator
    }

    /// The subgroup order Q, when known
    pub fn order(&self) -> Option<&[Limb]> {
        self.order.as_deref()
    }

    /// Exact bit length of P
    pub fn bit_len(&self) -> u32 {
        self.modulus.bit_len()
    }

    /// Serialized size of a public key in this group
    ///
    /// Agreed secrets use the same fixed-width encoding, so this is also
    /// the required output-buffer length for the agreement operation.
    pub fn sizeof_public_key(&self) -> usize {
        self.modulus.byte_len()
    }

    /// Group identity: reference identity, or value equality of (P, G, Q)
    pub fn is_same(&self, other: &DhGroup) -> bool {
        core::ptr::eq(self, other) || self == other
    }
}

/// a < b over trimmed little-endian limb values (public data, not
/// constant time)
pub(crate) fn value_lt(a: &[Limb], b: &[Limb]) -> bool {
    if a.len() != b.len() {
        return a.len() < b.len();
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

pub(crate) fn is_zero_value(limbs: &[Limb]) -> bool {
    limbs.iter().all(|&w| w == 0)
}
