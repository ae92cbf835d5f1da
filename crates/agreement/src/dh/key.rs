// File: crates/agreement/src/dh/key.rs

//! Discrete-log key objects

use alloc::vec::Vec;
use core::fmt;

use dlcrypt_algorithms::modular::{encode, Limb};
use dlcrypt_internal::constant_time::{ct_fits_bits, ct_limbs_lt, ct_limbs_zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

use super::group::DhGroup;

/// Width discipline for a private exponent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExponentRange {
    /// Exponent reduced modulo the subgroup order; the agreement
    /// operation processes exactly the declared number of bits
    Subgroup {
        /// Declared exponent width in bits
        bits: u32,
    },
    /// Full-width exponent, reduced modulo P; processed with the bit
    /// length of P
    Full,
}

/// A private exponent whose limbs are zeroized on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateExponent {
    limbs: Vec<Limb>,
    #[zeroize(skip)]
    range: ExponentRange,
}

impl PrivateExponent {
    pub(crate) fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    pub(crate) fn range(&self) -> ExponentRange {
        self.range
    }
}

impl fmt::Debug for PrivateExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateExponent([REDACTED])")
    }
}

/// A discrete-log key bound to a group descriptor
///
/// The key borrows its group, which must outlive it. A key may carry a
/// private exponent, a public element, or (in principle) both; the
/// agreement operation requires a private exponent on the caller's key
/// and a public element on the peer's key.
pub struct DhKey<'g> {
    group: &'g DhGroup,
    private: Option<PrivateExponent>,
    public: Option<Vec<Limb>>,
}

impl<'g> DhKey<'g> {
    /// Import a private exponent from its big-endian encoding
    ///
    /// The exponent must be non-zero. For `Subgroup { bits }` the value
    /// must fit the declared width and the width must fit the modulus;
    /// for `Full` the value must be less than P. Validation of the
    /// secret value runs in constant time.
    pub fn from_private_exponent(
        group: &'g DhGroup,
        exponent: &[u8],
        range: ExponentRange,
    ) -> Result<Self> {
        let limbs = encode::limbs_from_be_bytes(exponent);
        if bool::from(ct_limbs_zero(&limbs)) {
            return Err(Error::InvalidKey {
                key_type: "private",
                reason: "exponent is zero",
            });
        }

        match range {
            ExponentRange::Subgroup { bits } => {
                if bits == 0 || bits > group.bit_len() {
                    return Err(Error::InvalidKey {
                        key_type: "private",
                        reason: "declared exponent width out of range",
                    });
                }
                if !bool::from(ct_fits_bits(&limbs, bits)) {
                    return Err(Error::InvalidKey {
                        key_type: "private",
                        reason: "exponent wider than declared width",
                    });
                }
            }
            ExponentRange::Full => {
                let p = group.modulus().as_limbs();
                let reduced =
                    limbs.len() < p.len() ||
                    (limbs.len() == p.len() && bool::from(ct_limbs_lt(&limbs, p)));
                if !reduced {
                    return Err(Error::InvalidKey {
                        key_type: "private",
                        reason: "exponent not reduced modulo P",
                    });
                }
            }
        }

        Ok(Self {
            group,
            private: Some(PrivateExponent { limbs, range }),
            public: None,
        })
    }

    /// Import the peer's public element from its big-endian encoding
    ///
    /// The value must parse and be less than P; it is stored padded to
    /// the element width. No further validation is performed — in
    /// particular the degenerate values 0, 1 and P−1 are accepted by
    /// design (see the [module documentation](super)).
    pub fn from_public_element(group: &'g DhGroup, value: &[u8]) -> Result<Self> {
        let n = group.modulus().num_limbs();
        let p = group.modulus().as_limbs();
        let mut limbs = encode::limbs_from_be_bytes(value);
        let reduced =
            limbs.len() < p.len() || (limbs.len() == p.len() && bool::from(ct_limbs_lt(&limbs, p)));
        if !reduced {
            return Err(Error::InvalidKey {
                key_type: "public",
                reason: "value not reduced modulo P",
            });
        }
        limbs.resize(n, 0);
        Ok(Self {
            group,
            private: None,
            public: Some(limbs),
        })
    }

    /// The owning group
    pub fn group(&self) -> &'g DhGroup {
        self.group
    }

    /// Whether a private exponent is present
    pub fn has_private_key(&self) -> bool {
        self.private.is_some()
    }

    /// The private exponent, when present
    pub fn private_exponent(&self) -> Option<&PrivateExponent> {
        self.private.as_ref()
    }

    /// The public element, when present (element-width little-endian limbs)
    pub fn public_element(&self) -> Option<&[Limb]> {
        self.public.as_deref()
    }

    /// Number of exponent bits the agreement operation processes for
    /// this key: the declared width for a reduced exponent, the bit
    /// length of P otherwise
    pub fn exponent_bit_len(&self) -> u32 {
        match self.private.as_ref().map(PrivateExponent::range) {
            Some(ExponentRange::Subgroup { bits }) => bits,
            _ => self.group.bit_len(),
        }
    }
}

impl fmt::Debug for DhKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhKey")
            .field("group_bits", &self.group.bit_len())
            .field("has_private", &self.private.is_some())
            .field("has_public", &self.public.is_some())
            .finish()
    }
}
