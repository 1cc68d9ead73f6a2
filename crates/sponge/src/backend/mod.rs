//! Backend strategies: block absorption and finalization.
//!
//! A backend is two operations. `absorb` consumes whole rate-sized blocks and
//! reports how many trailing bytes it left; `finalize` pads the buffered tail,
//! runs the last permutation, and squeezes as much output as requested.
//!
//! The binding is resolved once per process into a per-variant table and
//! then copied into each context as plain data, so no call site ever
//! re-probes the CPU.

#![allow(clippy::indexing_slicing)] // table lookups use `Variant::index`

use backend::{Candidate, OnceCache, select};
use platform::Caps;

use crate::{
  config::{self, SpongeForce},
  context::SpongeState,
  keccak::KeccakState,
  variant::{VARIANT_COUNT, Variant},
};

#[cfg(target_arch = "aarch64")]
mod aarch64;
mod portable;

/// `absorb(state, input, rate) -> leftover`.
pub type AbsorbFn = fn(&mut KeccakState, &[u8], usize) -> usize;

/// `finalize(sponge, out)`; writes exactly `out.len()` bytes.
pub type FinalizeFn = fn(&mut SpongeState, &mut [u8]);

/// Contract every backend implements.
///
/// Implementations must be bit-identical to [`BackendId::Portable`] for the
/// same inputs.
pub trait SpongeBackend {
  const ID: BackendId;

  /// Absorb every whole `rate`-byte block of `input` into `state`, permuting
  /// once per block. Returns `input.len() % rate`. Never reads past `input`.
  fn absorb(state: &mut KeccakState, input: &[u8], rate: usize) -> usize;

  /// Pad `sponge.buf[..sponge.bufsz]` with `sponge.pad` and the final `0x80`
  /// bit, permute, then squeeze `out.len()` bytes, permuting again before
  /// every further rate block. On return `sponge.a` holds the state from
  /// which the last output block was read.
  fn finalize(sponge: &mut SpongeState, out: &mut [u8]);
}

/// Backend identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BackendId {
  Portable = 0,
  #[cfg(target_arch = "aarch64")]
  Aarch64Sha3 = 1,
}

impl BackendId {
  /// Backends compiled for this target, best first.
  #[cfg(target_arch = "aarch64")]
  pub const ALL: &'static [BackendId] = &[Self::Aarch64Sha3, Self::Portable];
  /// Backends compiled for this target, best first.
  #[cfg(not(target_arch = "aarch64"))]
  pub const ALL: &'static [BackendId] = &[Self::Portable];

  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha3 => "aarch64-sha3",
    }
  }

  #[inline]
  #[must_use]
  pub const fn required_caps(self) -> Caps {
    match self {
      Self::Portable => Caps::NONE,
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha3 => platform::caps::aarch64::SHA3_READY,
    }
  }

  /// Whether this backend can serve `variant`.
  ///
  /// Both backends absorb whole 64-bit lanes, which covers every rate in the
  /// variant table.
  #[inline]
  #[must_use]
  #[cfg_attr(not(target_arch = "aarch64"), allow(unused_variables))]
  pub const fn supports(self, variant: Variant) -> bool {
    match self {
      Self::Portable => true,
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha3 => variant.block_size() % 8 == 0,
    }
  }

  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|id| id.as_str().eq_ignore_ascii_case(name))
  }
}

/// A backend binding: identity plus its two operations.
#[derive(Clone, Copy)]
pub struct Backend {
  pub id: BackendId,
  pub absorb: AbsorbFn,
  pub finalize: FinalizeFn,
}

impl Backend {
  const fn of<B: SpongeBackend>() -> Self {
    Self {
      id: B::ID,
      absorb: B::absorb,
      finalize: B::finalize,
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.id.as_str()
  }
}

impl core::fmt::Debug for Backend {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("Backend").field(&self.id.as_str()).finish()
  }
}

/// Binding for `id`. Callers must have checked `id.required_caps()`.
#[inline]
#[must_use]
pub(crate) const fn binding(id: BackendId) -> Backend {
  match id {
    BackendId::Portable => Backend::of::<portable::Portable>(),
    #[cfg(target_arch = "aarch64")]
    BackendId::Aarch64Sha3 => Backend::of::<aarch64::Aarch64Sha3>(),
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Process-wide selection
// ─────────────────────────────────────────────────────────────────────────────

static ACTIVE: OnceCache<[Backend; VARIANT_COUNT]> = OnceCache::new();

#[must_use]
fn resolve(variant: Variant, caps: Caps, force: SpongeForce) -> BackendId {
  if let Some(id) = force.backend()
    && id.supports(variant)
    && caps.has(id.required_caps())
  {
    return id;
  }

  const COMPILED: usize = BackendId::ALL.len();
  let mut candidates = [Candidate::new("portable", Caps::NONE, BackendId::Portable); COMPILED];
  let mut n = 0usize;
  for &id in BackendId::ALL {
    if id.supports(variant) {
      candidates[n] = Candidate::new(id.as_str(), id.required_caps(), id);
      n += 1;
    }
  }
  select(caps, &candidates[..n]).map_or(BackendId::Portable, |s| s.func)
}

fn resolve_all() -> [Backend; VARIANT_COUNT] {
  let caps = platform::caps();
  let cfg = config::get();
  if cfg.requested_force != cfg.effective_force {
    log::warn!(
      "sponge backend {} unavailable on this CPU ({caps}); using auto selection",
      cfg.requested_force.as_str()
    );
  }

  let mut table = [binding(BackendId::Portable); VARIANT_COUNT];
  for variant in Variant::ALL {
    let id = resolve(variant, caps, cfg.effective_force);
    log::debug!(
      "{variant}: bound {} backend ({})",
      id.as_str(),
      if cfg.effective_force == SpongeForce::Auto { "auto" } else { "forced" }
    );
    table[variant.index()] = binding(id);
  }
  table
}

/// Backend bound to new contexts of `variant`.
#[inline]
#[must_use]
pub fn for_variant(variant: Variant) -> Backend {
  ACTIVE.get_or_init(resolve_all)[variant.index()]
}
