//! The operational gate is process-wide, so it gets its own test binary.

use sponge::{SpongeError, Variant, provider};

#[test]
fn closed_gate_blocks_construct_init_finalize_and_dup() {
  let mut ctx = provider::DigestCtx::new(Variant::Sha3_256).unwrap();
  ctx.update(b"abc").unwrap();

  provider::set_running(false);
  assert!(!provider::is_running());

  assert_eq!(provider::DigestCtx::new(Variant::Sha3_256).unwrap_err(), SpongeError::NotRunning);
  assert_eq!(ctx.init(None), Err(SpongeError::NotRunning));
  assert_eq!(ctx.dup().unwrap_err(), SpongeError::NotRunning);

  let mut out = [0u8; 32];
  assert_eq!(ctx.finalize(&mut out), Err(SpongeError::NotRunning));
  assert_eq!(out, [0u8; 32]);

  // Updates are not gated.
  ctx.update(b"def").unwrap();

  provider::set_running(true);
  assert_eq!(ctx.finalize(&mut out), Ok(32));

  let mut whole = provider::DigestCtx::new(Variant::Sha3_256).unwrap();
  whole.update(b"abcdef").unwrap();
  let mut expected = [0u8; 32];
  whole.finalize(&mut expected).unwrap();
  assert_eq!(out, expected);
}
