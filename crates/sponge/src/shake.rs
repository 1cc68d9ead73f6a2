//! SHAKE128 and SHAKE256 (FIPS 202 extendable-output functions).

use crate::{
  context::{SpongeContext, XofReader},
  variant::Variant,
};

macro_rules! define_shake {
  ($(#[$meta:meta])* $name:ident, $variant:ident) => {
    $(#[$meta])*
    #[derive(Clone, Debug)]
    pub struct $name {
      ctx: SpongeContext,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new()
      }
    }

    impl $name {
      #[inline]
      #[must_use]
      pub fn new() -> Self {
        Self {
          ctx: SpongeContext::new(Variant::$variant),
        }
      }

      #[inline]
      pub fn update(&mut self, data: &[u8]) {
        self.ctx.absorb(data);
      }

      /// Reader over the output stream. The hasher itself is left as is.
      #[inline]
      #[must_use]
      pub fn finalize_xof(&self) -> XofReader {
        self.ctx.clone().finish_xof()
      }

      #[inline]
      pub fn reset(&mut self) {
        self.ctx.reset();
      }

      /// One-shot: fill `out` with the output for `data`.
      #[inline]
      pub fn hash_into(data: &[u8], out: &mut [u8]) {
        let mut ctx = SpongeContext::new(Variant::$variant);
        ctx.absorb(data);
        ctx.finish_into(out);
      }
    }
  };
}

define_shake!(
  /// SHAKE128: 168-byte rate, 128-bit security.
  Shake128,
  Shake128
);
define_shake!(
  /// SHAKE256: 136-byte rate, 256-bit security.
  Shake256,
  Shake256
);

#[cfg(test)]
mod tests {
  use hex_literal::hex;
  use traits::Xof;

  use super::*;

  #[test]
  fn shake128_abc() {
    let mut out = [0u8; 64];
    Shake128::hash_into(b"abc", &mut out);
    assert_eq!(
      out,
      hex!(
        "5881092dd818bf5cf8a3ddb793fbcba74097d5c526a6d35f97b83351940f2cc8"
        "44c50af32acd3f2cdd066568706f509bc1bdde58295dae3f891a9a0fca578378"
      )
    );
  }

  #[test]
  fn shake256_empty_reader() {
    let mut reader = Shake256::new().finalize_xof();
    let head: [u8; 32] = reader.squeeze_array();
    let tail: [u8; 32] = reader.squeeze_array();
    assert_eq!(head, hex!("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"));
    assert_eq!(tail, hex!("d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be"));
  }

  #[test]
  fn reader_leaves_hasher_usable() {
    let mut h = Shake128::new();
    h.update(b"ab");
    let _ = h.finalize_xof();
    h.update(b"c");
    let mut a = [0u8; 16];
    h.finalize_xof().squeeze(&mut a);
    assert_eq!(a, hex!("5881092dd818bf5cf8a3ddb793fbcba7"));
  }
}
