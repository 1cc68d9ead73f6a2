//! Candidate selection.
//!
//! - [`Candidate`]: A backend with capability requirements
//! - [`Selected`]: The result of selection
//! - [`select`]: Choose the best candidate from an ordered list
//!
//! Algorithm crates list candidates best-first and finish with a portable
//! entry whose requirement is [`Caps::NONE`]:
//!
//! ```
//! use backend::dispatch::{Candidate, select};
//! use platform::caps::{Caps, aarch64};
//!
//! let candidates = [
//!   Candidate::new("aarch64-sha3", aarch64::SHA3_READY, 1u8),
//!   Candidate::new("portable", Caps::NONE, 0u8),
//! ];
//! let chosen = select(Caps::NONE, &candidates);
//! assert_eq!(chosen.map(|s| s.name), Some("portable"));
//! ```

use platform::Caps;

/// A candidate with capability requirements.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "aarch64-sha3").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The payload handed back on selection.
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  pub name: &'static str,
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the first candidate whose `requires` is satisfied by `caps`.
///
/// Returns `None` when nothing matches, which only happens if the list lacks
/// a portable fallback.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates
    .iter()
    .find(|c| caps.has(c.requires))
    .map(|c| Selected::new(c.name, c.func))
}
