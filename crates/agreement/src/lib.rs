//! Finite-field Diffie-Hellman key agreement
//!
//! This crate implements the classic discrete-log secret agreement
//! `S = Y^x mod P`: the group and key model, and the agreement operation
//! itself, built on the constant-time modular arithmetic engine in
//! `dlcrypt-algorithms`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dh;
pub mod error;

// Re-exports
pub use dh::{
    agree, secret_agreement, secret_agreement_with_engine, AgreeFlags, DhGroup, DhKey,
    DhSharedSecret, ExponentRange, PrivateExponent,
};
pub use dlcrypt_algorithms::modular::NumberFormat;
pub use error::{Error, Result};
