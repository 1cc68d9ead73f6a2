//! CPU capability representation.
//!
//! [`Caps`] answers one question: "which instructions may this process legally
//! execute?" It is a 256-bit bitset with one bit per ISA extension. Bits are
//! partitioned by architecture but the API is uniform across targets.
//!
//! # Bit Layout
//!
//! - Bits 0-63: reserved (x86 has no Keccak extension)
//! - Bits 64-127: aarch64 features
//! - Bits 128-255: reserved
//!
//! # Usage
//!
//! ```
//! use platform::caps::{Caps, aarch64};
//!
//! let c = Caps::NONE | aarch64::NEON;
//! assert!(!c.has(aarch64::SHA3_READY));
//! assert!(c.has(aarch64::NEON));
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 256-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`; it is computed once per process and
/// then passed around by value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 4]);

impl Caps {
  /// Empty capability set (portable code only).
  pub const NONE: Self = Self([0; 4]);

  /// Create a capability set from raw words.
  ///
  /// Only available with the `testing` feature or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 4]) -> Self {
    Self(words)
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0]
      && (self.0[1] & required.0[1]) == required.0[1]
      && (self.0[2] & required.0[2]) == required.0[2]
      && (self.0[3] & required.0[3]) == required.0[3]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([
      self.0[0] | other.0[0],
      self.0[1] | other.0[1],
      self.0[2] | other.0[2],
      self.0[3] | other.0[3],
    ])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones() + self.0[2].count_ones() + self.0[3].count_ones()
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let word = (bit / 64) as usize;
    let bit_in_word = bit % 64;
    let mut bits = [0u64; 4];
    match word {
      0 => bits[0] = 1u64 << bit_in_word,
      1 => bits[1] = 1u64 << bit_in_word,
      2 => bits[2] = 1u64 << bit_in_word,
      _ => bits[3] = 1u64 << bit_in_word,
    }
    Self(bits)
  }

  /// Iterate over the names of the known features present in this set.
  pub fn iter_names(self) -> impl Iterator<Item = &'static str> {
    NAMED.iter().filter(move |(_, c)| self.has(*c)).map(|(name, _)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.iter_names()).finish()
  }
}

impl core::fmt::Display for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    if self.is_empty() {
      return f.write_str("portable");
    }
    let mut first = true;
    for name in self.iter_names() {
      if !first {
        f.write_str(",")?;
      }
      f.write_str(name)?;
      first = false;
    }
    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features.
///
/// Only aarch64 has a Keccak instruction set; x86 targets always report
/// [`Caps::NONE`].
pub mod aarch64 {
  use super::Caps;

  pub const NEON: Caps = Caps::bit(64); // Baseline on AArch64
  pub const SHA3: Caps = Caps::bit(68); // FEAT_SHA3: EOR3, RAX1, XAR, BCAX

  /// Keccak-ready: NEON + SHA3 extension.
  pub const SHA3_READY: Caps = Caps([0, NEON.0[1] | SHA3.0[1], 0, 0]);
}

const NAMED: &[(&str, Caps)] = &[
  ("neon", aarch64::NEON),
  ("sha3", aarch64::SHA3),
];

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{string::ToString, vec::Vec};

  use super::*;

  #[test]
  fn none_has_none() {
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(Caps::NONE.is_empty());
    assert_eq!(Caps::NONE.count(), 0);
  }

  #[test]
  fn has_requires_every_bit() {
    let neon_only = aarch64::NEON;
    assert!(!neon_only.has(aarch64::SHA3_READY));
    let both = aarch64::NEON | aarch64::SHA3;
    assert!(both.has(aarch64::SHA3_READY));
    assert_eq!(both.count(), 2);
  }

  #[test]
  fn bit_lands_in_expected_word() {
    assert_eq!(Caps::bit(0).0, [1, 0, 0, 0]);
    assert_eq!(Caps::bit(68).0, [0, 1 << 4, 0, 0]);
    assert_eq!(Caps::bit(255).0, [0, 0, 0, 1 << 63]);
  }

  #[test]
  fn names_follow_bits() {
    let c = aarch64::SHA3 | aarch64::NEON;
    let names: Vec<_> = c.iter_names().collect();
    assert_eq!(names, ["neon", "sha3"]);
    assert_eq!(c.to_string(), "neon,sha3");
    assert_eq!(Caps::NONE.to_string(), "portable");
  }

  #[test]
  fn from_raw_round_trips() {
    let c = Caps::from_raw([3, 0, 0, 0]);
    assert!(c.has(Caps::bit(0)));
    assert!(c.has(Caps::bit(1)));
  }
}
