//! Memory safety patterns and secure wiping

use zeroize::Zeroize;

/// Memory barrier utilities
pub mod barrier {
    use core::sync::atomic::{compiler_fence, fence, Ordering};

    /// Insert a compiler fence to prevent reordering
    #[inline(always)]
    pub fn compiler_fence_seq_cst() {
        compiler_fence(Ordering::SeqCst);
    }

    /// Insert a full memory fence
    #[inline(always)]
    pub fn memory_fence_seq_cst() {
        fence(Ordering::SeqCst);
    }
}

/// Overwrite a buffer that held secret material
///
/// Built on `zeroize`, whose volatile writes the optimizer must not remove
/// even though the buffer is never read afterwards; the trailing compiler
/// fence keeps the wipe ordered before the memory is released.
pub fn secure_wipe<T: Zeroize + ?Sized>(data: &mut T) {
    data.zeroize();
    barrier::compiler_fence_seq_cst();
}
