//! Internal utilities for the dlcrypt library
//!
//! Low-level helpers shared by the arithmetic crates: constant-time
//! operations on machine-word limbs and endian/limb conversion. Nothing in
//! this crate allocates.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
pub mod endian;
