//! Keccak sponge digests behind one incremental interface.
//!
//! Twelve variants share a single engine: SHA3-224/256/384/512, pre-standard
//! Keccak-224/256/384/512, SHAKE-128/256, and the KECCAK-KMAC-128/256 sponge
//! that KMAC is built on. Each is a row of the [`variant`] table (rate,
//! default output length, domain byte); there is no per-variant code.
//!
//! # Layers
//!
//! - [`SpongeContext`]: state, buffering, finalization. `Clone` duplicates.
//! - [`provider::DigestCtx`]: the heap-owned, parameter-driven boundary with
//!   the operational gate (`alloc`).
//! - Typed front ends: [`Sha3_256`] and friends implement [`traits::Digest`];
//!   [`Shake128`], [`CShake128`], [`Kmac128`] hand out an [`XofReader`].
//!
//! # Backends
//!
//! Block absorption and finalization are bound once per process per variant:
//! the portable backend runs everywhere, and on aarch64 CPUs with FEAT_SHA3
//! a hardware permutation takes over. `SPONGE_FORCE_BACKEND` pins the choice
//! (see [`config`]).
//!
//! ```
//! use sponge::{Sha3_256, Shake128, traits::{Digest, Xof}};
//!
//! let d = Sha3_256::digest(b"abc");
//! assert_eq!(d[0], 0x3a);
//!
//! let mut xof = Shake128::new();
//! xof.update(b"abc");
//! let out: [u8; 16] = xof.finalize_xof().squeeze_array();
//! assert_eq!(out[0], 0x58);
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod config;
pub mod context;
mod error;
pub mod fixed;
pub mod keccak;
pub mod params;
#[cfg(feature = "alloc")]
pub mod provider;
pub mod shake;
pub mod sp800_185;
pub mod variant;

pub use context::{Phase, SpongeContext, XofReader};
pub use error::SpongeError;
pub use fixed::{Keccak224, Keccak256, Keccak384, Keccak512, Sha3_224, Sha3_256, Sha3_384, Sha3_512};
pub use shake::{Shake128, Shake256};
pub use sp800_185::{CShake128, CShake256, Kmac128, Kmac256};
pub use traits;
pub use variant::{DigestFlags, Variant};

/// Effective backend configuration for this process.
#[inline]
#[must_use]
pub fn config() -> config::SpongeConfig {
  config::get()
}
