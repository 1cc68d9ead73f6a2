//! Error type for sponge contexts and the digest provider boundary.

use core::fmt;

/// Failure reported by a sponge context, parameter call, or provider entry point.
///
/// Every failing call leaves the context exactly as it was, so a caller can
/// correct the input and retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SpongeError {
  /// The operational gate is closed (see [`crate::provider::set_running`]).
  NotRunning,
  /// The allocator could not provide memory for a context.
  Allocation,
  /// A recognised parameter carried a value of the wrong type or range.
  InvalidParam {
    /// Parameter key as supplied by the caller's table.
    key: &'static str,
  },
  /// The output length was changed after input had been absorbed.
  OutputLenLocked,
  /// The output buffer is shorter than the configured output length.
  OutputTooSmall {
    /// Configured output length in bytes.
    needed: usize,
    /// Length of the buffer that was passed in.
    got: usize,
  },
  /// The context was already finalized; call `reset` or `init` first.
  Finalized,
  /// No variant matches the requested algorithm name.
  UnknownVariant,
}

impl fmt::Display for SpongeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotRunning => f.write_str("digest provider is not running"),
      Self::Allocation => f.write_str("digest context allocation failed"),
      Self::InvalidParam { key } => write!(f, "invalid value for parameter `{key}`"),
      Self::OutputLenLocked => f.write_str("output length cannot change after update"),
      Self::OutputTooSmall { needed, got } => {
        write!(f, "output buffer too small: need {needed} bytes, got {got}")
      }
      Self::Finalized => f.write_str("context already finalized"),
      Self::UnknownVariant => f.write_str("unknown sponge variant"),
    }
  }
}

impl core::error::Error for SpongeError {}
