//! Runtime CPU detection.
//!
//! [`caps()`] returns the capabilities this process may use. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (`std::arch` feature macros, `std` only)
//! - Caching (via `OnceLock` with `std`, atomics without)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns portable caps)
//!
//! # Overrides
//!
//! ```
//! use platform::Caps;
//!
//! platform::set_caps_override(Some(Caps::NONE));
//! assert!(platform::caps().is_empty());
//! platform::set_caps_override(None);
//! ```

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────
//
// The override lives in atomics so it can be set and cleared any number of
// times, with or without `std`. It takes precedence over detection.

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);

static OVERRIDE_BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of detecting. Pass
/// `None` to resume detection.
///
/// Backend tables that were already resolved from an earlier `caps()` call
/// are not recomputed; set the override before the first digest is built.
pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      for (slot, word) in OVERRIDE_BITS.iter().zip(caps.0) {
        slot.store(word, Ordering::Release);
      }
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(Caps([
    OVERRIDE_BITS[0].load(Ordering::Acquire),
    OVERRIDE_BITS[1].load(Ordering::Acquire),
    OVERRIDE_BITS[2].load(Ordering::Acquire),
    OVERRIDE_BITS[3].load(Ordering::Acquire),
  ]))
}

// ─────────────────────────────────────────────────────────────────────────────
// no_std Cache
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "std"))]
mod cache {
  use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

  use crate::caps::Caps;

  /// 0 = uninitialized, 1 = initializing, 2 = initialized
  static STATE: AtomicU8 = AtomicU8::new(0);

  static BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

  #[inline]
  pub fn get_or_init(f: fn() -> Caps) -> Caps {
    if STATE.load(Ordering::Acquire) == 2 {
      return load();
    }

    match STATE.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let caps = f();
        for (slot, word) in BITS.iter().zip(caps.0) {
          slot.store(word, Ordering::Release);
        }
        STATE.store(2, Ordering::Release);
        caps
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) == 1 {
          core::hint::spin_loop();
        }
        load()
      }
    }
  }

  fn load() -> Caps {
    Caps([
      BITS[0].load(Ordering::Acquire),
      BITS[1].load(Ordering::Acquire),
      BITS[2].load(Ordering::Acquire),
      BITS[3].load(Ordering::Acquire),
    ])
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get the CPU capabilities for this process.
///
/// Detection runs once; later calls read the cache. An override set via
/// [`set_caps_override`] wins over detection. Under Miri this always returns
/// [`Caps::NONE`].
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Caps> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      cache::get_or_init(detect_uncached)
    }
  }
}

/// Detect capabilities without caching or overrides.
#[must_use]
pub fn detect_uncached() -> Caps {
  compile_time() | runtime()
}

/// Features the compiler was told it may assume.
#[must_use]
pub const fn compile_time() -> Caps {
  #[cfg_attr(not(target_arch = "aarch64"), allow(unused_mut))]
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;
    if cfg!(target_feature = "neon") {
      caps = caps.union(aarch64::NEON);
    }
    if cfg!(target_feature = "sha3") {
      caps = caps.union(aarch64::SHA3);
    }
  }

  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn runtime() -> Caps {
  use crate::caps::aarch64;

  let mut caps = Caps::NONE;
  if std::arch::is_aarch64_feature_detected!("neon") {
    caps |= aarch64::NEON;
  }
  if std::arch::is_aarch64_feature_detected!("sha3") {
    caps |= aarch64::SHA3;
  }
  caps
}

#[cfg(not(all(feature = "std", target_arch = "aarch64")))]
fn runtime() -> Caps {
  Caps::NONE
}
