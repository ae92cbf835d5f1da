//! Montgomery multiplication, exponentiation and element serialization
//!
//! Everything here operates on caller-provided scratch; see [`super::sizes`]
//! for the exact working-set requirements.

use dlcrypt_internal::constant_time::{ct_assign_limbs, ct_limbs_zero};
use dlcrypt_internal::endian::limb_byte;
use subtle::Choice;

use crate::error::{Error, Result};

use super::modulus::sub_limbs;
use super::sizes;
use super::{Limb, Modulus, NumberFormat, LIMB_BYTES};

impl Modulus {
    /// CIOS Montgomery multiplication: `out := a·b·R⁻¹ mod m`
    ///
    /// `a`, `b` and `out` are element-width; `acc` holds `n + 2` limbs.
    /// `out` must not alias `a` or `b`. Constant time: the loop structure
    /// depends only on the limb count.
    pub(crate) fn mont_mul(&self, a: &[Limb], b: &[Limb], out: &mut [Limb], acc: &mut [Limb]) {
        let n = self.num_limbs();
        let m = self.as_limbs();
        debug_assert_eq!(a.len(), n);
        debug_assert_eq!(b.len(), n);
        debug_assert_eq!(out.len(), n);
        debug_assert_eq!(acc.len(), n + 2);

        for t in acc.iter_mut() {
            *t = 0;
        }

        for i in 0..n {
            // Multiply-accumulate one word of b.
            let bi = b[i] as u64;
            let mut c: u64 = 0;
            for j in 0..n {
                let v = acc[j] as u64 + (a[j] as u64) * bi + c;
                acc[j] = v as Limb;
                c = v >> 32;
            }
            let v = acc[n] as u64 + c;
            acc[n] = v as Limb;
            acc[n + 1] = (v >> 32) as Limb;

            // Reduce: add the multiple of m that zeroes the low word, then
            // shift the accumulator down one word.
            let mw = acc[0].wrapping_mul(self.n0_inv()) as u64;
            let v = acc[0] as u64 + mw * (m[0] as u64);
            let mut c = v >> 32;
            for j in 1..n {
                let v = acc[j] as u64 + mw * (m[j] as u64) + c;
                acc[j - 1] = v as Limb;
                c = v >> 32;
            }
            let v = acc[n] as u64 + c;
            acc[n - 1] = v as Limb;
            acc[n] = acc[n + 1] + (v >> 32) as Limb;
        }

        // acc < 2m with the overflow bit in acc[n]; one conditional
        // subtraction brings the result into range.
        let borrow = sub_limbs(out, &acc[..n], m);
        let take_sub = Choice::from((acc[n] as u8) | (1 - borrow as u8));
        ct_assign_limbs(out, &acc[..n], !take_sub);
    }

    /// Compute `result := base^exponent mod m`, leaving the result in
    /// Montgomery form
    ///
    /// Processes exactly `exponent_bits` bits of the little-endian
    /// exponent, most significant first, as square-and-multiply-always
    /// with constant-time selection: runtime and memory-access pattern
    /// depend only on `exponent_bits` and the modulus width. Bits past
    /// the end of the exponent slice read as zero.
    pub fn mod_exp(
        &self,
        base: &[Limb],
        exponent: &[Limb],
        exponent_bits: u32,
        result: &mut [Limb],
        scratch: &mut [Limb],
    ) -> Result<()> {
        let n = self.num_limbs();
        if base.len() != n {
            return Err(Error::Length {
                context: "mod_exp base",
                expected: n,
                actual: base.len(),
            });
        }
        if result.len() != n {
            return Err(Error::Length {
                context: "mod_exp result",
                expected: n,
                actual: result.len(),
            });
        }
        let needed = sizes::mod_exp_scratch_limbs(n).ok_or(Error::Overflow {
            context: "mod_exp scratch size",
        })?;
        if scratch.len() < needed {
            return Err(Error::Length {
                context: "mod_exp scratch",
                expected: needed,
                actual: scratch.len(),
            });
        }

        let (base_m, rest) = scratch.split_at_mut(n);
        let (sq, rest) = rest.split_at_mut(n);
        let (prod, rest) = rest.split_at_mut(n);
        let (acc, _) = rest.split_at_mut(n + 2);

        // base into Montgomery form; result starts at 1 (R mod m).
        self.mont_mul(base, self.r2(), base_m, acc);
        result.copy_from_slice(self.r1());

        for i in (0..exponent_bits).rev() {
            self.mont_mul(&result[..], &result[..], sq, acc);
            self.mont_mul(sq, base_m, prod, acc);
            result.copy_from_slice(sq);
            ct_assign_limbs(result, prod, exponent_bit(exponent, i));
        }
        Ok(())
    }

    /// Constant-time zero test, independent of representation form
    pub fn is_zero(&self, element: &[Limb]) -> bool {
        debug_assert_eq!(element.len(), self.num_limbs());
        bool::from(ct_limbs_zero(element))
    }

    /// Serialize a Montgomery-form element into exactly `out.len()` bytes
    ///
    /// The value is converted out of Montgomery form in `scratch` and
    /// written in the requested byte order, zero-padded to the full
    /// output width. If the value does not fit, the call fails before a
    /// single output byte is written.
    pub fn element_to_bytes(
        &self,
        element: &[Limb],
        out: &mut [u8],
        format: NumberFormat,
        scratch: &mut [Limb],
    ) -> Result<()> {
        let n = self.num_limbs();
        if element.len() != n {
            return Err(Error::Length {
                context: "element_to_bytes element",
                expected: n,
                actual: element.len(),
            });
        }
        let needed = sizes::mod_op_scratch_limbs(n).ok_or(Error::Overflow {
            context: "element_to_bytes scratch size",
        })?;
        if scratch.len() < needed {
            return Err(Error::Length {
                context: "element_to_bytes scratch",
                expected: needed,
                actual: scratch.len(),
            });
        }

        let (std_form, rest) = scratch.split_at_mut(n);
        let (unit, rest) = rest.split_at_mut(n);
        let (acc, _) = rest.split_at_mut(n + 2);

        // Multiplying by the plain integer 1 strips the Montgomery factor.
        for w in unit.iter_mut() {
            *w = 0;
        }
        unit[0] = 1;
        self.mont_mul(element, unit, std_form, acc);

        // The value must fit the requested width; check before writing so
        // the output buffer is never partially written.
        for k in out.len()..n * LIMB_BYTES {
            if limb_byte(std_form, k) != 0 {
                return Err(Error::Encoding {
                    context: "element_to_bytes",
                    details: "value does not fit output width",
                });
            }
        }

        match format {
            NumberFormat::MsbFirst => {
                let len = out.len();
                for k in 0..len {
                    out[len - 1 - k] = limb_byte(std_form, k);
                }
            }
            NumberFormat::LsbFirst => {
                for (k, byte) in out.iter_mut().enumerate() {
                    *byte = limb_byte(std_form, k);
                }
            }
        }
        Ok(())
    }
}

/// Bit `i` of a little-endian limb value; bits past the end read as zero
#[inline(always)]
fn exponent_bit(exponent: &[Limb], i: u32) -> Choice {
    let limb = (i / 32) as usize;
    if limb >= exponent.len() {
        return Choice::from(0u8);
    }
    Choice::from(((exponent[limb] >> (i % 32)) & 1) as u8)
}
