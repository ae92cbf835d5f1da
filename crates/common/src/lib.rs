//! Common implementations and shared functionality for the dlcrypt library
//!
//! This crate provides the secure-memory utilities used across the dlcrypt
//! components: zeroize-on-drop containers, memory barriers, and the scratch
//! arena that backs per-operation working memory.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod security;

// Re-export core security types
pub use security::{ScratchArena, SecretVec};

// Re-export memory barrier utilities
pub use security::memory::barrier;
