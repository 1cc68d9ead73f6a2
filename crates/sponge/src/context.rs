//! Sponge context: state, buffering, and finalization.
//!
//! A [`SpongeContext`] owns everything by value: the Keccak state, a
//! rate-sized input buffer, the configured output length, and the backend
//! binding. `Clone` is a complete duplicate, so forks of a common prefix are
//! just `ctx.clone()`.
//!
//! ```text
//! new ──> Ready ──update──> Absorbing ──finalize──> Finalized
//!           ^                                          │
//!           └──────────────────── reset ───────────────┘
//! ```

#![allow(clippy::indexing_slicing)] // `bufsz < rate <= MAX_RATE` is maintained by every method

use traits::Xof;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
  SpongeError,
  backend::{self, Backend},
  keccak::{self, KeccakState},
  params::XOFLEN,
  variant::Variant,
};

/// Largest rate of any variant (SHAKE-128 / KECCAK-KMAC-128).
pub const MAX_RATE: usize = 168;

/// Raw sponge state handed to backends.
///
/// Invariants: `rate` is a multiple of 8 no larger than [`MAX_RATE`], and
/// `bufsz < rate` between calls.
#[derive(Clone)]
pub struct SpongeState {
  pub a: KeccakState,
  pub buf: [u8; MAX_RATE],
  pub bufsz: usize,
  pub rate: usize,
  pub pad: u8,
}

impl SpongeState {
  #[must_use]
  pub const fn new(rate: usize, pad: u8) -> Self {
    Self {
      a: [0u64; 25],
      buf: [0u8; MAX_RATE],
      bufsz: 0,
      rate,
      pad,
    }
  }

  /// Turn `buf[..bufsz]` into the final padded block `buf[..rate]`.
  ///
  /// The tail is zeroed, the domain byte lands at `bufsz`, and the top bit
  /// of the last byte is set (both may hit the same byte).
  #[inline]
  pub fn pad_final_block(&mut self) {
    let (bufsz, rate) = (self.bufsz, self.rate);
    self.buf[bufsz..rate].fill(0);
    self.buf[bufsz] = self.pad;
    self.buf[rate - 1] |= 0x80;
    self.bufsz = 0;
  }
}

impl Zeroize for SpongeState {
  fn zeroize(&mut self) {
    self.a.zeroize();
    self.buf.zeroize();
    self.bufsz.zeroize();
    self.rate.zeroize();
    self.pad.zeroize();
  }
}

/// Lifecycle phase of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
  /// Freshly constructed or reset; nothing absorbed.
  Ready,
  /// At least one non-empty update has been absorbed.
  Absorbing,
  /// Output has been produced. Only `reset` leaves this phase.
  Finalized,
}

/// Incremental sponge digest context.
#[derive(Clone)]
pub struct SpongeContext {
  state: SpongeState,
  variant: Variant,
  md_size: usize,
  backend: Backend,
  phase: Phase,
}

impl SpongeContext {
  /// Context for `variant` with the process-wide backend binding.
  #[must_use]
  pub fn new(variant: Variant) -> Self {
    Self::with_backend(variant, backend::for_variant(variant))
  }

  pub(crate) fn with_backend(variant: Variant, backend: Backend) -> Self {
    let info = variant.info();
    Self {
      state: SpongeState::new(info.rate, info.pad),
      variant,
      md_size: info.md_size,
      backend,
      phase: Phase::Ready,
    }
  }

  /// Zero the state and buffer and return to [`Phase::Ready`].
  ///
  /// The configured output length and backend binding are kept.
  pub fn reset(&mut self) {
    self.state.a.zeroize();
    self.state.buf.zeroize();
    self.state.bufsz = 0;
    self.phase = Phase::Ready;
  }

  /// Absorb `data`.
  ///
  /// Chunking is irrelevant: any split of the same byte stream across calls
  /// yields the same digest. An empty slice is a no-op.
  pub fn update(&mut self, data: &[u8]) -> Result<(), SpongeError> {
    if self.phase == Phase::Finalized {
      return Err(SpongeError::Finalized);
    }
    self.absorb(data);
    Ok(())
  }

  /// Update engine shared by every front end.
  pub(crate) fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }
    debug_assert!(self.phase != Phase::Finalized);
    self.phase = Phase::Absorbing;

    let absorb = self.backend.absorb;
    let st = &mut self.state;
    let rate = st.rate;

    if st.bufsz != 0 {
      let space = rate - st.bufsz;
      if data.len() < space {
        st.buf[st.bufsz..st.bufsz + data.len()].copy_from_slice(data);
        st.bufsz += data.len();
        return;
      }
      let (head, rest) = data.split_at(space);
      st.buf[st.bufsz..rate].copy_from_slice(head);
      let consumed = absorb(&mut st.a, &st.buf[..rate], rate);
      debug_assert_eq!(consumed, 0);
      st.bufsz = 0;
      data = rest;
    }

    let leftover = absorb(&mut st.a, data, rate);
    debug_assert!(leftover < rate);
    st.buf[..leftover].copy_from_slice(&data[data.len() - leftover..]);
    st.bufsz = leftover;
  }

  /// Set the output length of an extendable-output variant.
  ///
  /// Allowed any number of times before the first non-empty update; the
  /// last value wins.
  pub fn set_output_len(&mut self, len: usize) -> Result<(), SpongeError> {
    if !self.variant.is_xof() {
      return Err(SpongeError::InvalidParam { key: XOFLEN });
    }
    if self.phase != Phase::Ready {
      return Err(SpongeError::OutputLenLocked);
    }
    self.md_size = len;
    Ok(())
  }

  #[cfg(feature = "std")]
  pub(crate) fn force_output_len(&mut self, len: usize) {
    self.md_size = len;
  }

  /// Write the digest into `out[..output_len()]` and return its length.
  ///
  /// An empty `out` is a request for no output: it reports `output_len()`
  /// without touching the backend or leaving the current phase. Fails
  /// without side effects when `out` is too short or the context is already
  /// finalized.
  pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, SpongeError> {
    if self.phase == Phase::Finalized {
      return Err(SpongeError::Finalized);
    }
    let needed = self.md_size;
    if out.is_empty() {
      return Ok(needed);
    }
    let Some(dst) = out.get_mut(..needed) else {
      return Err(SpongeError::OutputTooSmall { needed, got: out.len() });
    };
    self.finish_into(dst);
    Ok(needed)
  }

  /// Pad, permute, and squeeze `out.len()` bytes; moves to `Finalized`.
  pub(crate) fn finish_into(&mut self, out: &mut [u8]) {
    debug_assert!(self.phase != Phase::Finalized);
    if !out.is_empty() {
      (self.backend.finalize)(&mut self.state, out);
    }
    self.phase = Phase::Finalized;
  }

  /// Finalize into an incremental reader instead of a fixed buffer.
  ///
  /// Ignores the configured output length; the reader produces as many bytes
  /// as the caller squeezes.
  pub fn finalize_xof(&mut self) -> Result<XofReader, SpongeError> {
    if self.phase == Phase::Finalized {
      return Err(SpongeError::Finalized);
    }
    Ok(self.finish_xof())
  }

  pub(crate) fn finish_xof(&mut self) -> XofReader {
    let rate = self.state.rate;
    let mut reader = XofReader {
      a: [0u64; 25],
      block: [0u8; MAX_RATE],
      rate,
      pos: 0,
    };
    self.finish_into(&mut reader.block[..rate]);
    reader.a = self.state.a;
    reader
  }

  #[inline]
  #[must_use]
  pub fn variant(&self) -> Variant {
    self.variant
  }

  /// Rate in bytes.
  #[inline]
  #[must_use]
  pub fn block_size(&self) -> usize {
    self.state.rate
  }

  /// Bytes `finalize_into` will write.
  #[inline]
  #[must_use]
  pub fn output_len(&self) -> usize {
    self.md_size
  }

  /// Bytes held in the buffer, always below the rate.
  #[inline]
  #[must_use]
  pub fn buffered(&self) -> usize {
    self.state.bufsz
  }

  #[inline]
  #[must_use]
  pub fn phase(&self) -> Phase {
    self.phase
  }

  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.backend.name()
  }
}

impl core::fmt::Debug for SpongeContext {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("SpongeContext")
      .field("variant", &self.variant)
      .field("phase", &self.phase)
      .field("buffered", &self.state.bufsz)
      .field("output_len", &self.md_size)
      .field("backend", &self.backend.name())
      .finish_non_exhaustive()
  }
}

impl Drop for SpongeContext {
  fn drop(&mut self) {
    // SAFETY: `self` is valid for writes of `size_of::<Self>()` bytes. Every
    // field is `Copy` without drop glue, so nothing reads the (now invalid)
    // backend pointers after this returns.
    unsafe { zeroize::zeroize_flat_type(self as *mut Self) }
  }
}

impl ZeroizeOnDrop for SpongeContext {}

// ─────────────────────────────────────────────────────────────────────────────
// Incremental squeeze
// ─────────────────────────────────────────────────────────────────────────────

/// Extendable-output reader over a finalized sponge.
///
/// Consecutive squeezes continue one stream: 10 bytes then 20 bytes equals
/// one 30-byte squeeze.
#[derive(Clone)]
pub struct XofReader {
  a: KeccakState,
  block: [u8; MAX_RATE],
  rate: usize,
  pos: usize,
}

impl Xof for XofReader {
  fn squeeze(&mut self, mut out: &mut [u8]) {
    while !out.is_empty() {
      if self.pos == self.rate {
        keccak::permute(&mut self.a);
        keccak::extract(&self.a, &mut self.block[..self.rate]);
        self.pos = 0;
      }
      let take = core::cmp::min(self.rate - self.pos, out.len());
      let (head, rest) = out.split_at_mut(take);
      head.copy_from_slice(&self.block[self.pos..self.pos + take]);
      self.pos += take;
      out = rest;
    }
  }
}

impl core::fmt::Debug for XofReader {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("XofReader").finish_non_exhaustive()
  }
}

impl Drop for XofReader {
  fn drop(&mut self) {
    self.a.zeroize();
    self.block.zeroize();
    self.rate.zeroize();
    self.pos.zeroize();
  }
}

impl ZeroizeOnDrop for XofReader {}
