//! Byte-encoding helpers for limb values

use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};
use dlcrypt_internal::endian::limbs_for_bytes;

use crate::error::{Error, Result};

use super::Limb;

/// Parse big-endian bytes into a little-endian limb vector
///
/// The result is trimmed of leading zero limbs but always holds at least
/// one limb (the value zero parses to `[0]`).
pub fn limbs_from_be_bytes(bytes: &[u8]) -> Vec<Limb> {
    let n = limbs_for_bytes(bytes.len()).max(1);
    let mut limbs: Vec<Limb> = core::iter::repeat(0).take(n).collect();

    let head = bytes.len() % 4;
    let mut idx = limbs_for_bytes(bytes.len());
    let mut pos = 0;
    if head != 0 {
        let mut w: Limb = 0;
        for &b in &bytes[..head] {
            w = (w << 8) | b as Limb;
        }
        idx -= 1;
        limbs[idx] = w;
        pos = head;
    }
    while pos < bytes.len() {
        idx -= 1;
        limbs[idx] = BigEndian::read_u32(&bytes[pos..pos + 4]);
        pos += 4;
    }

    while limbs.len() > 1 && limbs[limbs.len() - 1] == 0 {
        limbs.pop();
    }
    limbs
}

/// Parse big-endian bytes into exactly `width` little-endian limbs
///
/// Zero-pads narrow values; fails if the value needs more limbs than
/// `width`.
pub fn limbs_from_be_bytes_fixed(bytes: &[u8], width: usize) -> Result<Vec<Limb>> {
    let mut limbs = limbs_from_be_bytes(bytes);
    if limbs.len() > width {
        return Err(Error::Length {
            context: "limbs_from_be_bytes_fixed",
            expected: width,
            actual: limbs.len(),
        });
    }
    limbs.resize(width, 0);
    Ok(limbs)
}
