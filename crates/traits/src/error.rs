//! Error types shared across digest implementations.

use core::fmt;

/// MAC tag verification failed.
///
/// Intentionally opaque: it carries no hint of which byte differed or how
/// many matched. Implementations compare tags in constant time before
/// returning it.
///
/// ```
/// use traits::VerificationError;
///
/// fn check(ok: bool) -> Result<(), VerificationError> {
///   if ok { Ok(()) } else { Err(VerificationError::new()) }
/// }
///
/// assert!(check(false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn display_and_debug() {
    assert_eq!(VerificationError::new().to_string(), "verification failed");
    assert_eq!(format!("{:?}", VerificationError::new()), "VerificationError");
  }

  #[test]
  fn zero_sized_and_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VerificationError>();
    assert_eq!(core::mem::size_of::<VerificationError>(), 0);
  }

  #[test]
  fn has_no_source() {
    use core::error::Error;
    assert!(VerificationError::default().source().is_none());
  }
}
