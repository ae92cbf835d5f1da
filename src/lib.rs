//! # dlcrypt
//!
//! A modular discrete-log cryptography library centered on finite-field
//! Diffie-Hellman secret agreement.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dlcrypt = "0.2"
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dlcrypt-api`](api): public error taxonomy and serialization traits
//! - [`dlcrypt-common`](common): secure-memory utilities (scratch arena, wiping)
//! - [`dlcrypt-internal`](internal): constant-time limb and endian helpers
//! - [`dlcrypt-algorithms`](algorithms): constant-time modular arithmetic engine
//! - [`dlcrypt-agreement`](agreement): group/key model and the secret-agreement
//!   operation

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use dlcrypt_agreement as agreement;
pub use dlcrypt_algorithms as algorithms;
pub use dlcrypt_api as api;
pub use dlcrypt_common as common;
pub use dlcrypt_internal as internal;

/// Common imports for dlcrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, SerializeSecret};

    // Re-export the key-agreement surface
    pub use crate::agreement::{
        agree, secret_agreement, AgreeFlags, DhGroup, DhKey, DhSharedSecret, ExponentRange,
        NumberFormat,
    };

    // Re-export security types
    pub use crate::common::security::{ScratchArena, SecretVec};
}
