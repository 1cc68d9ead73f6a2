//! Core digest traits for the sponge workspace.
//!
//! `no_std` compatible with zero dependencies.
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Digest`] | Fixed-size cryptographic hash | SHA3-256, Keccak-256 |
//! | [`Xof`] | Extendable output reader | SHAKE128, KMACXOF256 |
//!
//! # Error Types
//!
//! - [`VerificationError`] - Opaque error for MAC tag verification
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
mod xof;

pub use digest::Digest;
pub use error::VerificationError;
pub use xof::Xof;
