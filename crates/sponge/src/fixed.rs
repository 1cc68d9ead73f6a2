//! Fixed-output digests: SHA3-224/256/384/512 and Keccak-224/256/384/512.
//!
//! One generic [`FixedDigest`] drives a [`SpongeContext`] for the variant its
//! marker names. `finalize` works on a copy, so the hasher keeps absorbing.

use core::marker::PhantomData;

use traits::Digest;

use crate::{context::SpongeContext, variant::Variant};

/// Compile-time variant selector for [`FixedDigest`].
pub trait FixedVariant {
  const VARIANT: Variant;
}

/// Zero-sized variant markers.
pub mod marker {
  use super::FixedVariant;
  use crate::variant::Variant;

  macro_rules! define_markers {
    ($($name:ident => $variant:ident),+ $(,)?) => {
      $(
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl FixedVariant for $name {
          const VARIANT: Variant = Variant::$variant;
        }
      )+
    };
  }

  define_markers! {
    Sha3_224 => Sha3_224,
    Sha3_256 => Sha3_256,
    Sha3_384 => Sha3_384,
    Sha3_512 => Sha3_512,
    Keccak224 => Keccak224,
    Keccak256 => Keccak256,
    Keccak384 => Keccak384,
    Keccak512 => Keccak512,
  }
}

/// Fixed-size digest over the variant `V`, producing `N` bytes.
pub struct FixedDigest<V: FixedVariant, const N: usize> {
  ctx: SpongeContext,
  _variant: PhantomData<V>,
}

impl<V: FixedVariant, const N: usize> FixedDigest<V, N> {
  /// Name of the underlying variant.
  #[inline]
  #[must_use]
  pub fn name() -> &'static str {
    V::VARIANT.name()
  }

  /// Backend the context is bound to.
  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.ctx.backend_name()
  }
}

impl<V: FixedVariant, const N: usize> Clone for FixedDigest<V, N> {
  fn clone(&self) -> Self {
    Self {
      ctx: self.ctx.clone(),
      _variant: PhantomData,
    }
  }
}

impl<V: FixedVariant, const N: usize> Default for FixedDigest<V, N> {
  #[inline]
  fn default() -> Self {
    <Self as Digest>::new()
  }
}

impl<V: FixedVariant, const N: usize> core::fmt::Debug for FixedDigest<V, N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple(V::VARIANT.name()).field(&self.ctx.buffered()).finish()
  }
}

impl<V: FixedVariant, const N: usize> Digest for FixedDigest<V, N> {
  const OUTPUT_SIZE: usize = N;
  const BLOCK_SIZE: usize = V::VARIANT.block_size();
  type Output = [u8; N];

  #[inline]
  fn new() -> Self {
    const {
      assert!(
        !V::VARIANT.is_xof() && V::VARIANT.output_len() == N,
        "digest length must match the variant"
      );
    }
    Self {
      ctx: SpongeContext::new(V::VARIANT),
      _variant: PhantomData,
    }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.ctx.absorb(data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    let mut out = [0u8; N];
    self.ctx.clone().finish_into(&mut out);
    out
  }

  #[inline]
  fn reset(&mut self) {
    self.ctx.reset();
  }
}

/// SHA3-224.
pub type Sha3_224 = FixedDigest<marker::Sha3_224, 28>;
/// SHA3-256.
pub type Sha3_256 = FixedDigest<marker::Sha3_256, 32>;
/// SHA3-384.
pub type Sha3_384 = FixedDigest<marker::Sha3_384, 48>;
/// SHA3-512.
pub type Sha3_512 = FixedDigest<marker::Sha3_512, 64>;
/// Keccak-224 (pre-standard padding).
pub type Keccak224 = FixedDigest<marker::Keccak224, 28>;
/// Keccak-256 (pre-standard padding, as used by Ethereum).
pub type Keccak256 = FixedDigest<marker::Keccak256, 32>;
/// Keccak-384 (pre-standard padding).
pub type Keccak384 = FixedDigest<marker::Keccak384, 48>;
/// Keccak-512 (pre-standard padding).
pub type Keccak512 = FixedDigest<marker::Keccak512, 64>;
