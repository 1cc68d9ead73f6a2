//! CPU capability detection for the sponge workspace.
//!
//! This crate is the single place that asks the CPU what it can do. Backend
//! selection in `sponge` reads [`caps()`] and never probes the hardware on its
//! own.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine
//! - [`Arch`]: Which architecture this build targets
//!
//! # Main Entry Point
//!
//! ```
//! use platform::caps::aarch64;
//!
//! let caps = platform::caps();
//! if caps.has(aarch64::SHA3_READY) {
//!   // Use the FEAT_SHA3 permutation
//! }
//! ```
//!
//! Compile-time features are folded in via `cfg!`; runtime detection is cached
//! in `OnceLock` (std) or atomics (no_std). Under Miri, always returns
//! portable-only caps.

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::{caps, compile_time, detect_uncached, has_override, set_caps_override};
