//! Security primitives and memory safety utilities
//!
//! This module provides foundational security types used throughout the
//! dlcrypt ecosystem to ensure proper handling of sensitive material: a
//! zeroize-on-drop byte container, an arena for per-operation scratch
//! memory with guaranteed wipe-then-release, and memory barriers.

pub mod memory;
pub mod scratch;
pub mod secret;

// Re-export core security types
pub use scratch::ScratchArena;
pub use secret::SecretVec;

// Re-export memory barrier utilities
pub use memory::barrier;
