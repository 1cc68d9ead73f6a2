//! Backend crate: once-resolved dispatch primitives.
//!
//! - **Selection**: pick the best [`dispatch::Candidate`] for the detected caps
//! - **Caching**: keep the resolved table in a [`OnceCache`] so each process
//!   selects exactly once
//!
//! Algorithm crates own the candidate lists; this crate only knows how to walk
//! them and remember the answer.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Selected, select};
pub use platform;
