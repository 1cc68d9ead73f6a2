//! Digest-consumer boundary.
//!
//! [`DigestCtx`] is the heap-owned handle a provider table hands out:
//! construct, init, update, finalize, duplicate, free, and the parameter
//! calls. Construction, init, finalize and duplication are gated on a
//! process-wide "operational" flag; when the gate is closed they fail with
//! [`SpongeError::NotRunning`] and produce nothing.

use alloc::{
  alloc::{Layout, alloc_zeroed},
  boxed::Box,
};
use core::sync::atomic::{AtomicBool, Ordering};

use crate::{
  SpongeError,
  context::SpongeContext,
  params::{self, DigestParams, Param, ParamDescriptor, XOFLEN},
  variant::Variant,
};

static RUNNING: AtomicBool = AtomicBool::new(true);

/// Whether the provider is operational.
#[inline]
#[must_use]
pub fn is_running() -> bool {
  RUNNING.load(Ordering::Acquire)
}

/// Open or close the operational gate for every context in the process.
pub fn set_running(running: bool) {
  RUNNING.store(running, Ordering::Release);
}

#[inline]
fn gate() -> Result<(), SpongeError> {
  if is_running() { Ok(()) } else { Err(SpongeError::NotRunning) }
}

/// Move `ctx` into zero-initialized heap memory, reporting allocator failure
/// instead of aborting.
fn try_box(ctx: SpongeContext) -> Result<Box<SpongeContext>, SpongeError> {
  let layout = Layout::new::<SpongeContext>();
  // SAFETY: `SpongeContext` holds a 200-byte state and a 168-byte buffer, so
  // the layout is never zero-sized.
  let ptr = unsafe { alloc_zeroed(layout) }.cast::<SpongeContext>();
  if ptr.is_null() {
    return Err(SpongeError::Allocation);
  }
  // SAFETY: `ptr` is non-null, was allocated with the layout of
  // `SpongeContext` by the global allocator, and is written before the box
  // takes ownership, which matches what `Box::from_raw` requires.
  unsafe {
    ptr.write(ctx);
    Ok(Box::from_raw(ptr))
  }
}

/// Pull the validated output length out of `params`, if one applies.
///
/// `xoflen` is only meaningful for extendable-output variants; fixed-size
/// variants ignore it.
fn requested_len(variant: Variant, params: &[Param<'_>]) -> Result<Option<usize>, SpongeError> {
  if !variant.is_xof() {
    return Ok(None);
  }
  match params::locate(params, XOFLEN) {
    None => Ok(None),
    Some(p) => p
      .value
      .as_size()
      .map(Some)
      .ok_or(SpongeError::InvalidParam { key: XOFLEN }),
  }
}

/// Heap-owned digest context.
///
/// Dropping the handle wipes the whole context; [`DigestCtx::free`] does the
/// same explicitly.
pub struct DigestCtx {
  inner: Box<SpongeContext>,
}

impl DigestCtx {
  /// Construct a context for `variant`.
  pub fn new(variant: Variant) -> Result<Self, SpongeError> {
    gate()?;
    let inner = try_box(SpongeContext::new(variant))?;
    log::trace!("{variant}: new context ({} backend)", inner.backend_name());
    Ok(Self { inner })
  }

  /// Reset to an empty message and apply `params`.
  ///
  /// Parameters are validated first; a malformed one leaves the context as
  /// it was. Without an `xoflen` entry the previously configured length is
  /// kept.
  pub fn init(&mut self, params: Option<&[Param<'_>]>) -> Result<(), SpongeError> {
    gate()?;
    let len = match params {
      Some(p) => requested_len(self.inner.variant(), p)?,
      None => None,
    };
    self.inner.reset();
    if let Some(len) = len {
      self.inner.set_output_len(len)?;
    }
    Ok(())
  }

  /// Absorb `data`. Not gated.
  #[inline]
  pub fn update(&mut self, data: &[u8]) -> Result<(), SpongeError> {
    self.inner.update(data)
  }

  /// Write the digest into `out` and return the number of bytes written.
  pub fn finalize(&mut self, out: &mut [u8]) -> Result<usize, SpongeError> {
    gate()?;
    self.inner.finalize_into(out)
  }

  /// Independent copy of the full context.
  pub fn dup(&self) -> Result<Self, SpongeError> {
    gate()?;
    let inner = try_box((*self.inner).clone())?;
    log::trace!("{}: duplicated context", inner.variant());
    Ok(Self { inner })
  }

  /// Wipe and release the context.
  pub fn free(self) {
    log::trace!("{}: free context", self.inner.variant());
    drop(self);
  }

  /// Apply settable parameters.
  ///
  /// Unknown keys are ignored, as is `xoflen` on fixed-size variants. An
  /// `xoflen` that is not a byte count fails with
  /// [`SpongeError::InvalidParam`]; after the first non-empty update it fails
  /// with [`SpongeError::OutputLenLocked`]. Either way the context is
  /// unchanged.
  pub fn set_params(&mut self, params: &[Param<'_>]) -> Result<(), SpongeError> {
    match requested_len(self.inner.variant(), params)? {
      Some(len) => self.inner.set_output_len(len),
      None => Ok(()),
    }
  }

  /// Parameters accepted by [`DigestCtx::set_params`] for this context.
  #[must_use]
  pub fn settable_params(&self) -> &'static [ParamDescriptor] {
    params::settable(self.inner.variant())
  }

  /// Static parameters of `variant`.
  #[must_use]
  pub const fn get_params(variant: Variant) -> DigestParams {
    DigestParams::of(variant)
  }

  /// The underlying context.
  #[inline]
  #[must_use]
  pub fn context(&self) -> &SpongeContext {
    &self.inner
  }
}

impl core::fmt::Debug for DigestCtx {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("DigestCtx").field(&*self.inner).finish()
  }
}
