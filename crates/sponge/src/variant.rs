//! Variant table.
//!
//! Every sponge digest in this crate is one row of [`TABLE`]: a security
//! level, a padding family, and the rate and default output length derived
//! from them. One generic constructor reads the row; there is no per-variant
//! code.

use core::str::FromStr;

use bitflags::bitflags;

use crate::SpongeError;

/// Padding family. Each family uses a distinct domain-separation byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
  /// FIPS 202 SHA3 (`0x06`).
  Sha3,
  /// Pre-standard Keccak as used by Ethereum (`0x01`).
  Keccak,
  /// FIPS 202 SHAKE (`0x1F`).
  Shake,
  /// The cSHAKE sponge underneath KMAC (`0x04`).
  KeccakKmac,
}

impl Family {
  /// Domain-separation byte written at the end of the message.
  #[inline]
  #[must_use]
  pub const fn pad(self) -> u8 {
    match self {
      Self::Sha3 => 0x06,
      Self::Keccak => 0x01,
      Self::Shake => 0x1F,
      Self::KeccakKmac => 0x04,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_xof(self) -> bool {
    matches!(self, Self::Shake | Self::KeccakKmac)
  }
}

bitflags! {
  /// Digest flag bits reported by get-parameters.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub struct DigestFlags: u64 {
    /// Output length is caller-chosen.
    const XOF = 0x0001;
    /// No AlgorithmIdentifier parameters are encoded for this digest.
    const ALGID_ABSENT = 0x0002;
  }
}

/// Static parameters of one variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantInfo {
  pub name: &'static str,
  pub family: Family,
  /// Security level in bits.
  pub bits: u16,
  /// Absorb/squeeze block size in bytes: `(1600 - 2 * bits) / 8`.
  pub rate: usize,
  /// Default output length in bytes.
  pub md_size: usize,
  pub pad: u8,
  pub xof: bool,
}

const fn row(name: &'static str, family: Family, bits: u16) -> VariantInfo {
  let rate = (1600 - 2 * bits as usize) / 8;
  let md_size = match family {
    Family::KeccakKmac => 2 * bits as usize / 8,
    _ => bits as usize / 8,
  };
  VariantInfo {
    name,
    family,
    bits,
    rate,
    md_size,
    pad: family.pad(),
    xof: family.is_xof(),
  }
}

/// Supported sponge variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Variant {
  Sha3_224 = 0,
  Sha3_256,
  Sha3_384,
  Sha3_512,
  Keccak224,
  Keccak256,
  Keccak384,
  Keccak512,
  Shake128,
  Shake256,
  KeccakKmac128,
  KeccakKmac256,
}

/// Number of rows in [`TABLE`].
pub const VARIANT_COUNT: usize = 12;

/// One row per [`Variant`], indexed by discriminant.
pub const TABLE: [VariantInfo; VARIANT_COUNT] = [
  row("SHA3-224", Family::Sha3, 224),
  row("SHA3-256", Family::Sha3, 256),
  row("SHA3-384", Family::Sha3, 384),
  row("SHA3-512", Family::Sha3, 512),
  row("KECCAK-224", Family::Keccak, 224),
  row("KECCAK-256", Family::Keccak, 256),
  row("KECCAK-384", Family::Keccak, 384),
  row("KECCAK-512", Family::Keccak, 512),
  row("SHAKE-128", Family::Shake, 128),
  row("SHAKE-256", Family::Shake, 256),
  row("KECCAK-KMAC-128", Family::KeccakKmac, 128),
  row("KECCAK-KMAC-256", Family::KeccakKmac, 256),
];

impl Variant {
  pub const ALL: [Variant; VARIANT_COUNT] = [
    Self::Sha3_224,
    Self::Sha3_256,
    Self::Sha3_384,
    Self::Sha3_512,
    Self::Keccak224,
    Self::Keccak256,
    Self::Keccak384,
    Self::Keccak512,
    Self::Shake128,
    Self::Shake256,
    Self::KeccakKmac128,
    Self::KeccakKmac256,
  ];

  #[inline]
  #[must_use]
  pub const fn index(self) -> usize {
    self as usize
  }

  #[inline]
  #[must_use]
  #[allow(clippy::indexing_slicing)] // discriminants are 0..VARIANT_COUNT
  pub const fn info(self) -> VariantInfo {
    TABLE[self as usize]
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    self.info().name
  }

  #[inline]
  #[must_use]
  pub const fn family(self) -> Family {
    self.info().family
  }

  /// Rate in bytes.
  #[inline]
  #[must_use]
  pub const fn block_size(self) -> usize {
    self.info().rate
  }

  /// Default output length in bytes.
  #[inline]
  #[must_use]
  pub const fn output_len(self) -> usize {
    self.info().md_size
  }

  #[inline]
  #[must_use]
  pub const fn pad(self) -> u8 {
    self.info().pad
  }

  #[inline]
  #[must_use]
  pub const fn is_xof(self) -> bool {
    self.info().xof
  }

  #[must_use]
  pub const fn flags(self) -> DigestFlags {
    if self.is_xof() {
      DigestFlags::XOF
    } else {
      DigestFlags::ALGID_ABSENT
    }
  }

  /// Look a variant up by name.
  ///
  /// Case-insensitive, and `-`/`_` separators are optional, so `SHA3-256`,
  /// `sha3_256`, and `SHAKE128` all resolve.
  pub fn from_name(name: &str) -> Result<Self, SpongeError> {
    Self::ALL
      .into_iter()
      .find(|v| loose_eq(v.name(), name))
      .ok_or(SpongeError::UnknownVariant)
  }
}

fn normalized(s: &str) -> impl Iterator<Item = u8> + '_ {
  s.bytes()
    .filter(|b| *b != b'-' && *b != b'_')
    .map(|b| b.to_ascii_uppercase())
}

fn loose_eq(canonical: &str, candidate: &str) -> bool {
  !candidate.is_empty() && normalized(canonical).eq(normalized(candidate))
}

impl FromStr for Variant {
  type Err = SpongeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_name(s)
  }
}

impl core::fmt::Display for Variant {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}
