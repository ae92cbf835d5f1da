//! Per-operation scratch memory with guaranteed wipe-then-release
//!
//! Cryptographic operations in dlcrypt draw all of their working memory
//! from a single [`ScratchArena`] allocated at the start of the operation
//! and owned by it exclusively. The arena never outlives the operation and
//! its entire buffer is wiped when it is dropped — on the success path and
//! on every early error return alike.

use alloc::vec::Vec;
use core::fmt;
use dlcrypt_api::{Error, Result};
use zeroize::Zeroize;

use super::memory::secure_wipe;

/// A single contiguous scratch buffer, wiped in full on release
///
/// The buffer is zero-initialized on creation and handed out as one
/// mutable slice; callers partition it with `split_at_mut`, which keeps
/// every sub-region bounds-checked and lifetime-bound to the arena.
pub struct ScratchArena<T: Zeroize + Default + Copy>
where
    [T]: Zeroize,
{
    buf: Vec<T>,
}

impl<T: Zeroize + Default + Copy> ScratchArena<T>
where
    [T]: Zeroize,
{
    /// Allocate a zero-initialized arena of `len` elements
    ///
    /// Allocation failure is reported as an error rather than an abort;
    /// on that path no buffer exists and there is nothing to wipe.
    pub fn new(len: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| Error::AllocationFailed {
            context: "ScratchArena::new",
            bytes: len.saturating_mul(core::mem::size_of::<T>()),
        })?;
        buf.resize(len, T::default());
        Ok(Self { buf })
    }

    /// Number of elements in the arena
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The whole buffer, for the owning operation to partition
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Overwrite every element of the buffer
    ///
    /// Called automatically when the arena is dropped; exposed so tests
    /// can observe that no residue survives.
    pub fn wipe(&mut self) {
        secure_wipe(self.buf.as_mut_slice());
    }
}

impl<T: Zeroize + Default + Copy> Drop for ScratchArena<T>
where
    [T]: Zeroize,
{
    fn drop(&mut self) {
        self.wipe();
    }
}

impl<T: Zeroize + Default + Copy> fmt::Debug for ScratchArena<T>
where
    [T]: Zeroize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScratchArena(len={}, [REDACTED])", self.buf.len())
    }
}
