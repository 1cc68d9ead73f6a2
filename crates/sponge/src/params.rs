//! Parameter objects for the provider boundary.
//!
//! A parameter list is a slice of `(key, typed value)` pairs drawn from a
//! fixed, variant-independent key set. Setters ignore keys they do not know;
//! getters report a fixed four-entry table.

use crate::variant::{DigestFlags, Variant};

/// Absorb block size in bytes (get).
pub const BLOCK_SIZE: &str = "blocksize";
/// Digest size in bytes (get).
pub const DIGEST_SIZE: &str = "size";
/// `1` for extendable-output variants (get).
pub const XOF: &str = "xof";
/// `1` when no AlgorithmIdentifier parameters are encoded (get).
pub const ALGID_ABSENT: &str = "algid-absent";
/// Requested output length in bytes (set, XOF variants only).
pub const XOFLEN: &str = "xoflen";

/// Type tag of a [`ParamValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
  UInt,
  Int,
  Utf8,
  Octets,
}

/// A typed parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamValue<'a> {
  UInt(u64),
  Int(i64),
  Utf8(&'a str),
  Octets(&'a [u8]),
}

impl ParamValue<'_> {
  #[inline]
  #[must_use]
  pub const fn kind(&self) -> ParamKind {
    match self {
      Self::UInt(_) => ParamKind::UInt,
      Self::Int(_) => ParamKind::Int,
      Self::Utf8(_) => ParamKind::Utf8,
      Self::Octets(_) => ParamKind::Octets,
    }
  }

  /// Read a byte count. Accepts unsigned integers and non-negative signed
  /// integers that fit `usize`.
  #[must_use]
  pub fn as_size(&self) -> Option<usize> {
    match *self {
      Self::UInt(v) => usize::try_from(v).ok(),
      Self::Int(v) => usize::try_from(v).ok(),
      Self::Utf8(_) | Self::Octets(_) => None,
    }
  }
}

/// One `(key, value)` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param<'a> {
  pub key: &'a str,
  pub value: ParamValue<'a>,
}

impl<'a> Param<'a> {
  #[inline]
  #[must_use]
  pub const fn uint(key: &'a str, value: u64) -> Self {
    Self {
      key,
      value: ParamValue::UInt(value),
    }
  }

  #[inline]
  #[must_use]
  pub const fn int(key: &'a str, value: i64) -> Self {
    Self {
      key,
      value: ParamValue::Int(value),
    }
  }

  #[inline]
  #[must_use]
  pub const fn utf8(key: &'a str, value: &'a str) -> Self {
    Self {
      key,
      value: ParamValue::Utf8(value),
    }
  }

  #[inline]
  #[must_use]
  pub const fn octets(key: &'a str, value: &'a [u8]) -> Self {
    Self {
      key,
      value: ParamValue::Octets(value),
    }
  }
}

/// First entry with `key`, if any.
#[must_use]
pub fn locate<'p, 'a>(params: &'p [Param<'a>], key: &str) -> Option<&'p Param<'a>> {
  params.iter().find(|p| p.key == key)
}

/// Get-parameters result for a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestParams {
  pub block_size: usize,
  pub digest_size: usize,
  pub flags: DigestFlags,
}

impl DigestParams {
  #[must_use]
  pub const fn of(variant: Variant) -> Self {
    Self {
      block_size: variant.block_size(),
      digest_size: variant.output_len(),
      flags: variant.flags(),
    }
  }

  /// The same data as a parameter list.
  #[must_use]
  pub fn to_params(&self) -> [Param<'static>; 4] {
    [
      Param::uint(BLOCK_SIZE, self.block_size as u64),
      Param::uint(DIGEST_SIZE, self.digest_size as u64),
      Param::int(XOF, i64::from(self.flags.contains(DigestFlags::XOF))),
      Param::int(ALGID_ABSENT, i64::from(self.flags.contains(DigestFlags::ALGID_ABSENT))),
    ]
  }
}

/// Describes one settable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamDescriptor {
  pub key: &'static str,
  pub kind: ParamKind,
}

const XOF_SETTABLE: &[ParamDescriptor] = &[ParamDescriptor {
  key: XOFLEN,
  kind: ParamKind::UInt,
}];

/// Settable parameters for `variant`: `xoflen` for XOF variants, none otherwise.
#[must_use]
pub const fn settable(variant: Variant) -> &'static [ParamDescriptor] {
  if variant.is_xof() { XOF_SETTABLE } else { &[] }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn as_size_accepts_integers_only() {
    assert_eq!(ParamValue::UInt(64).as_size(), Some(64));
    assert_eq!(ParamValue::Int(0).as_size(), Some(0));
    assert_eq!(ParamValue::Int(-1).as_size(), None);
    assert_eq!(ParamValue::Utf8("64").as_size(), None);
    assert_eq!(ParamValue::Octets(&[64]).as_size(), None);
  }

  #[test]
  fn locate_finds_first_match() {
    let params = [Param::uint("other", 1), Param::uint(XOFLEN, 7), Param::uint(XOFLEN, 9)];
    assert_eq!(locate(&params, XOFLEN).map(|p| p.value), Some(ParamValue::UInt(7)));
    assert!(locate(&params, "missing").is_none());
  }

  #[test]
  fn get_params_for_fixed_and_xof() {
    let sha = DigestParams::of(Variant::Sha3_384);
    assert_eq!(
      sha.to_params(),
      [
        Param::uint(BLOCK_SIZE, 104),
        Param::uint(DIGEST_SIZE, 48),
        Param::int(XOF, 0),
        Param::int(ALGID_ABSENT, 1),
      ]
    );
    let kmac = DigestParams::of(Variant::KeccakKmac128);
    assert_eq!(kmac.block_size, 168);
    assert_eq!(kmac.digest_size, 32);
    assert_eq!(kmac.flags, DigestFlags::XOF);
  }

  #[test]
  fn only_xof_variants_have_settables() {
    for v in Variant::ALL {
      let s = settable(v);
      if v.is_xof() {
        assert_eq!(s, &[ParamDescriptor { key: XOFLEN, kind: ParamKind::UInt }]);
      } else {
        assert!(s.is_empty());
      }
    }
  }
}
