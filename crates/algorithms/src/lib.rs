//! Arithmetic primitives for the dlcrypt library
//!
//! This crate implements generic big-integer modular arithmetic with a
//! focus on constant-time operation and resistance to side-channel
//! attacks. The library is designed to be usable in both `std` and
//! `no_std` environments.
//!
//! # Security Features
//!
//! - Montgomery-form exponentiation whose runtime and memory-access
//!   pattern depend only on public widths, never on secret values
//! - All working memory is caller-provided; no operation allocates
//! - Exact, overflow-checked scratch-size computation

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{Error, Result};

// Modular arithmetic engine
pub mod modular;
pub use modular::{
    ExpMode, Limb, ModularEngine, Modulus, MontgomeryEngine, NumberFormat, LIMB_BYTES,
};
