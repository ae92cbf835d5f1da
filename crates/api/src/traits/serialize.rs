// File: crates/api/src/traits/serialize.rs

//! Traits for byte serialization of secret-bearing types.

use crate::Result;
use alloc::vec::Vec;
use zeroize::Zeroizing;

/// A trait for secret types that can be securely serialized.
pub trait SerializeSecret: Sized {
    /// Creates an object from a byte slice. Input should be zeroized after use.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
    /// Converts the object to a byte vector that is zeroized on drop.
    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>>;
}
