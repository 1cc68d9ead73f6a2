//! Sponge backend runtime configuration.
//!
//! One knob: `SPONGE_FORCE_BACKEND` pins backend selection for every variant.
//! It is read once per process (`std` only). Forced modes are always clamped
//! to detected CPU capabilities, so forcing a backend the CPU lacks falls back
//! to automatic selection instead of faulting.

use platform::Caps;

use crate::backend::BackendId;

/// Environment variable consulted under `std`.
pub const FORCE_ENV: &str = "SPONGE_FORCE_BACKEND";

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpongeForce {
  /// Use the best backend the CPU supports.
  #[default]
  Auto,
  /// Always use the portable backend.
  Portable,
  /// Use the ARMv8.2 SHA3 backend (aarch64 only, if available).
  Aarch64Sha3,
}

impl SpongeForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Aarch64Sha3 => "aarch64-sha3",
    }
  }

  /// Parse a force value. Accepts `generic` for portable and `sha3`/`hw`
  /// for the aarch64 backend.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("generic") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("aarch64-sha3")
      || value.eq_ignore_ascii_case("sha3")
      || value.eq_ignore_ascii_case("hw")
    {
      return Some(Self::Aarch64Sha3);
    }
    None
  }

  /// Backend this force mode pins, if any.
  #[must_use]
  pub const fn backend(self) -> Option<BackendId> {
    match self {
      Self::Auto => None,
      Self::Portable => Some(BackendId::Portable),
      #[cfg(target_arch = "aarch64")]
      Self::Aarch64Sha3 => Some(BackendId::Aarch64Sha3),
      #[cfg(not(target_arch = "aarch64"))]
      Self::Aarch64Sha3 => None,
    }
  }
}

/// Effective configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpongeConfig {
  /// Requested force mode (env).
  pub requested_force: SpongeForce,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: SpongeForce,
}

#[cfg(feature = "std")]
fn read_env_force() -> SpongeForce {
  let Ok(value) = std::env::var(FORCE_ENV) else {
    return SpongeForce::Auto;
  };
  if value.trim().is_empty() {
    return SpongeForce::Auto;
  }
  match SpongeForce::parse(&value) {
    Some(force) => {
      log::debug!("{FORCE_ENV}={} requested", force.as_str());
      force
    }
    None => {
      log::warn!("ignoring unrecognised {FORCE_ENV} value {value:?}");
      SpongeForce::Auto
    }
  }
}

#[cfg(feature = "std")]
fn requested_force() -> SpongeForce {
  use std::sync::OnceLock;
  static FORCE: OnceLock<SpongeForce> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested_force() -> SpongeForce {
  SpongeForce::Auto
}

#[inline]
#[must_use]
pub(crate) fn clamp_force_to_caps(requested: SpongeForce, caps: Caps) -> SpongeForce {
  match requested.backend() {
    None if requested == SpongeForce::Auto => SpongeForce::Auto,
    Some(id) if caps.has(id.required_caps()) => requested,
    _ => SpongeForce::Auto,
  }
}

/// Get the effective configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> SpongeConfig {
  let requested_force = requested_force();
  SpongeConfig {
    requested_force,
    effective_force: clamp_force_to_caps(requested_force, platform::caps()),
  }
}
