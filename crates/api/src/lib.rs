//! Public API traits and types for the dlcrypt library
//!
//! This crate provides the public API surface shared by the dlcrypt crates:
//! the error taxonomy returned to callers and the serialization contract for
//! secret-bearing types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::SerializeSecret;
