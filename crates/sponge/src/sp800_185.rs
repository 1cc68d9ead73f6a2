//! NIST SP 800-185 constructions: cSHAKE and KMAC.
//!
//! Both run on KECCAK-KMAC contexts (domain byte `0x04`). The encoded prefix
//! `bytepad(encode_string(N) || encode_string(S), rate)` is absorbed once at
//! construction and the resulting context is kept as the reset point.
//! cSHAKE with empty `N` and `S` is plain SHAKE and switches to the SHAKE
//! variant instead.

#![allow(clippy::indexing_slicing)] // fixed 9-byte encoding buffers

use subtle::{Choice, ConstantTimeEq};
use traits::{VerificationError, Xof};
use zeroize::Zeroize;

use crate::{
  context::{MAX_RATE, SpongeContext, XofReader},
  variant::Variant,
};

const ZEROES: [u8; MAX_RATE] = [0u8; MAX_RATE];

/// `left_encode(x)`: byte length prefix, then `x` big-endian, no leading zeros.
#[inline]
fn left_encode(val: u64, b: &mut [u8; 9]) -> &[u8] {
  b[1..].copy_from_slice(&val.to_be_bytes());
  let i = b[1..8].iter().take_while(|&&a| a == 0).count();
  b[i] = (8 - i) as u8;
  &b[i..]
}

/// `right_encode(x)`: `x` big-endian, no leading zeros, then its byte length.
#[inline]
fn right_encode(val: u64, b: &mut [u8; 9]) -> &[u8] {
  b[..8].copy_from_slice(&val.to_be_bytes());
  let i = b[..7].iter().take_while(|&&a| a == 0).count();
  b[8] = (8 - i) as u8;
  &b[i..=8]
}

/// Tracks how many prefix bytes went into a `bytepad` so the tail can be
/// zero-filled to the rate.
struct BytePad<'a> {
  ctx: &'a mut SpongeContext,
  absorbed: usize,
}

impl<'a> BytePad<'a> {
  fn start(ctx: &'a mut SpongeContext) -> Self {
    let mut b = [0u8; 9];
    let w = ctx.block_size() as u64;
    let mut pad = Self { ctx, absorbed: 0 };
    pad.absorb(left_encode(w, &mut b));
    pad
  }

  fn absorb(&mut self, data: &[u8]) {
    self.ctx.absorb(data);
    self.absorbed += data.len();
  }

  fn encode_string(&mut self, data: &[u8]) {
    let mut b = [0u8; 9];
    self.absorb(left_encode((data.len() as u64) * 8, &mut b));
    self.absorb(data);
  }

  fn finish(self) {
    let rate = self.ctx.block_size();
    let rem = self.absorbed % rate;
    if rem != 0 {
      self.ctx.absorb(&ZEROES[..rate - rem]);
    }
  }
}

/// Context primed with the cSHAKE prefix for `(N, S)`.
fn cshake_context(shake: Variant, kmac: Variant, function_name: &[u8], customization: &[u8]) -> SpongeContext {
  if function_name.is_empty() && customization.is_empty() {
    return SpongeContext::new(shake);
  }
  let mut ctx = SpongeContext::new(kmac);
  let mut pad = BytePad::start(&mut ctx);
  pad.encode_string(function_name);
  pad.encode_string(customization);
  pad.finish();
  ctx
}

/// Context primed for KMAC: cSHAKE prefix with `N = "KMAC"`, then the padded key.
fn kmac_context(kmac: Variant, key: &[u8], customization: &[u8]) -> SpongeContext {
  let mut ctx = SpongeContext::new(kmac);
  let mut pad = BytePad::start(&mut ctx);
  pad.encode_string(b"KMAC");
  pad.encode_string(customization);
  pad.finish();

  let mut pad = BytePad::start(&mut ctx);
  pad.encode_string(key);
  pad.finish();
  ctx
}

macro_rules! define_cshake {
  ($(#[$meta:meta])* $name:ident, $shake:ident, $kmac:ident) => {
    $(#[$meta])*
    #[derive(Clone, Debug)]
    pub struct $name {
      initial: SpongeContext,
      ctx: SpongeContext,
    }

    impl $name {
      /// cSHAKE with function name `N` and customization string `S`.
      #[must_use]
      pub fn new(function_name: &[u8], customization: &[u8]) -> Self {
        let ctx = cshake_context(Variant::$shake, Variant::$kmac, function_name, customization);
        Self {
          initial: ctx.clone(),
          ctx,
        }
      }

      #[inline]
      pub fn update(&mut self, data: &[u8]) {
        self.ctx.absorb(data);
      }

      #[inline]
      #[must_use]
      pub fn finalize_xof(&self) -> XofReader {
        self.ctx.clone().finish_xof()
      }

      /// Back to the state right after construction; `N` and `S` are kept.
      #[inline]
      pub fn reset(&mut self) {
        self.ctx = self.initial.clone();
      }

      pub fn hash_into(function_name: &[u8], customization: &[u8], data: &[u8], out: &mut [u8]) {
        let mut ctx = cshake_context(Variant::$shake, Variant::$kmac, function_name, customization);
        ctx.absorb(data);
        ctx.finish_into(out);
      }
    }
  };
}

define_cshake!(
  /// cSHAKE128.
  CShake128,
  Shake128,
  KeccakKmac128
);
define_cshake!(
  /// cSHAKE256.
  CShake256,
  Shake256,
  KeccakKmac256
);

macro_rules! define_kmac {
  ($(#[$meta:meta])* $name:ident, $kmac:ident) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      initial: SpongeContext,
      ctx: SpongeContext,
    }

    impl $name {
      #[must_use]
      pub fn new(key: &[u8], customization: &[u8]) -> Self {
        let ctx = kmac_context(Variant::$kmac, key, customization);
        Self {
          initial: ctx.clone(),
          ctx,
        }
      }

      #[inline]
      pub fn update(&mut self, data: &[u8]) {
        self.ctx.absorb(data);
      }

      /// Back to the keyed state; key and customization are kept.
      #[inline]
      pub fn reset(&mut self) {
        self.ctx = self.initial.clone();
      }

      /// Fixed-length MAC of `out.len()` bytes. The length is bound into the
      /// tag, so a 32-byte tag is not a prefix of a 64-byte one.
      pub fn finalize_into(&self, out: &mut [u8]) {
        let mut ctx = self.ctx.clone();
        let mut b = [0u8; 9];
        ctx.absorb(right_encode((out.len() as u64) * 8, &mut b));
        ctx.finish_into(out);
      }

      /// KMACXOF: output length is not bound into the stream.
      #[must_use]
      pub fn finalize_xof(&self) -> XofReader {
        let mut ctx = self.ctx.clone();
        let mut b = [0u8; 9];
        ctx.absorb(right_encode(0, &mut b));
        ctx.finish_xof()
      }

      /// Compare `tag` against the MAC of the same length in constant time.
      /// An empty tag never verifies.
      pub fn verify(&self, tag: &[u8]) -> Result<(), VerificationError> {
        if tag.is_empty() {
          return Err(VerificationError::new());
        }
        let mut ctx = self.ctx.clone();
        let mut b = [0u8; 9];
        ctx.absorb(right_encode((tag.len() as u64) * 8, &mut b));
        let mut reader = ctx.finish_xof();

        let mut eq = Choice::from(1u8);
        let mut block = [0u8; 64];
        for want in tag.chunks(block.len()) {
          let got = &mut block[..want.len()];
          reader.squeeze(got);
          eq &= got.ct_eq(want);
        }
        block.zeroize();

        if bool::from(eq) {
          Ok(())
        } else {
          Err(VerificationError::new())
        }
      }
    }

    impl core::fmt::Debug for $name {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct(stringify!($name)).finish_non_exhaustive()
      }
    }
  };
}

define_kmac!(
  /// KMAC128 and KMACXOF128.
  Kmac128,
  KeccakKmac128
);
define_kmac!(
  /// KMAC256 and KMACXOF256.
  Kmac256,
  KeccakKmac256
);

#[cfg(test)]
mod tests {
  use hex_literal::hex;

  use super::*;
  use crate::shake::Shake128;

  const KEY: [u8; 32] = hex!("404142434445464748494a4b4c4d4e4f505152535455565758595a5b5c5d5e5f");
  const DATA: [u8; 4] = [0x00, 0x01, 0x02, 0x03];

  #[test]
  fn encodings() {
    let mut b = [0u8; 9];
    assert_eq!(left_encode(0, &mut b), &[0x01, 0x00]);
    assert_eq!(left_encode(168, &mut b), &[0x01, 0xA8]);
    assert_eq!(left_encode(256, &mut b), &[0x02, 0x01, 0x00]);
    assert_eq!(right_encode(0, &mut b), &[0x00, 0x01]);
    assert_eq!(right_encode(256, &mut b), &[0x01, 0x00, 0x02]);
    assert_eq!(right_encode(u64::MAX, &mut b), &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x08]);
  }

  #[test]
  fn kmac128_sample_1() {
    let mut out = [0u8; 32];
    let mut mac = Kmac128::new(&KEY, b"");
    mac.update(&DATA);
    mac.finalize_into(&mut out);
    assert_eq!(out, hex!("e5780b0d3ea6f7d3a429c5706aa43a00fadbd7d49628839e3187243f456ee14e"));
    assert!(mac.verify(&out).is_ok());
  }

  #[test]
  fn kmac128_sample_2() {
    let mut out = [0u8; 32];
    let mut mac = Kmac128::new(&KEY, b"My Tagged Application");
    mac.update(&DATA);
    mac.finalize_into(&mut out);
    assert_eq!(out, hex!("3b1fba963cd8b0b59e8c1a6d71888b7143651af8ba0a7070c0979e2811324aa5"));
  }

  #[test]
  fn kmac256_sample_4() {
    let mut out = [0u8; 64];
    let mut mac = Kmac256::new(&KEY, b"My Tagged Application");
    mac.update(&DATA);
    mac.finalize_into(&mut out);
    assert_eq!(
      out,
      hex!(
        "20c570c31346f703c9ac36c61c03cb64c3970d0cfc787e9b79599d273a68d2f7"
        "f69d4cc3de9d104a351689f27cf6f5951f0103f33f4f24871024d9c27773a8dd"
      )
    );
    assert!(mac.verify(&out).is_ok());
  }

  #[test]
  fn kmacxof128_sample() {
    let mut mac = Kmac128::new(&KEY, b"");
    mac.update(&DATA);
    let out: [u8; 32] = mac.finalize_xof().squeeze_array();
    assert_eq!(out, hex!("cd83740bbd92ccc8cf032b1481a0f4460e7ca9dd12b08a0c4031178bacd6ec35"));
  }

  #[test]
  fn verify_rejects_bad_tags() {
    let mut mac = Kmac128::new(&KEY, b"");
    mac.update(&DATA);
    let mut tag = [0u8; 32];
    mac.finalize_into(&mut tag);
    tag[31] ^= 1;
    assert_eq!(mac.verify(&tag), Err(VerificationError::new()));
    assert!(mac.verify(&[]).is_err());
    // A shorter tag is a different MAC, not a prefix.
    tag[31] ^= 1;
    assert!(mac.verify(&tag[..16]).is_err());
  }

  #[test]
  fn reset_returns_to_keyed_state() {
    let mut mac = Kmac256::new(b"key", b"ctx");
    mac.update(b"garbage");
    mac.reset();
    mac.update(b"msg");
    let mut a = [0u8; 32];
    mac.finalize_into(&mut a);

    let mut fresh = Kmac256::new(b"key", b"ctx");
    fresh.update(b"msg");
    assert!(fresh.verify(&a).is_ok());
  }

  #[test]
  fn cshake_samples() {
    let mut out = [0u8; 32];
    CShake128::hash_into(b"", b"Email Signature", &DATA, &mut out);
    assert_eq!(out, hex!("c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5"));

    let mut h = CShake256::new(b"", b"Email Signature");
    h.update(&DATA);
    let out: [u8; 64] = h.finalize_xof().squeeze_array();
    assert_eq!(
      out,
      hex!(
        "d008828e2b80ac9d2218ffee1d070c48b8e4c87bff32c9699d5b6896eee0edd1"
        "64020e2be0560858d9c00c037e34a96937c561a74c412bb4c746469527281c8c"
      )
    );
  }

  #[test]
  fn empty_cshake_is_shake() {
    let mut a = [0u8; 48];
    let mut b = [0u8; 48];
    CShake128::hash_into(b"", b"", b"abc", &mut a);
    Shake128::hash_into(b"abc", &mut b);
    assert_eq!(a, b);
  }
}
