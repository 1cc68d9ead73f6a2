#![no_main]

use libfuzzer_sys::fuzz_target;
use sponge::{
  SpongeContext, Variant,
  params::{Param, XOFLEN},
  provider::DigestCtx,
};
use traits::Xof as _;

fn parse_u16_le(input: &[u8]) -> u16 {
  match input.len() {
    0 => 0,
    1 => input[0] as u16,
    _ => u16::from_le_bytes([input[0], input[1]]),
  }
}

const XOFS: [Variant; 4] = [Variant::Shake128, Variant::Shake256, Variant::KeccakKmac128, Variant::KeccakKmac256];

fuzz_target!(|input: &[u8]| {
  // Layout:
  // - 2 bytes: out_len (capped)
  // - 1 byte: variant index
  // - 1 byte: squeeze split (mod out_len+1)
  // - rest: data
  let out_len = (parse_u16_le(input) as usize) % 2049;
  let variant = XOFS[input.get(2).copied().unwrap_or(0) as usize % XOFS.len()];
  let split = if out_len == 0 {
    0usize
  } else {
    input.get(3).copied().unwrap_or(0) as usize % (out_len + 1)
  };
  let data = input.get(4..).unwrap_or(&[]);

  // Provider path with xoflen.
  let mut ctx = DigestCtx::new(variant).unwrap();
  ctx.set_params(&[Param::uint(XOFLEN, out_len as u64)]).unwrap();
  ctx.update(data).unwrap();
  let mut fixed = vec![0u8; out_len];
  assert_eq!(ctx.finalize(&mut fixed), Ok(out_len));

  // Reader path, split across two squeezes.
  let mut raw = SpongeContext::new(variant);
  raw.update(data).unwrap();
  let mut reader = raw.finalize_xof().unwrap();
  let mut streamed = vec![0u8; out_len];
  reader.squeeze(&mut streamed[..split]);
  reader.squeeze(&mut streamed[split..]);
  assert_eq!(fixed, streamed);

  // Shorter request is a prefix.
  let mut short = SpongeContext::new(variant);
  short.set_output_len(split).unwrap();
  short.update(data).unwrap();
  let mut prefix = vec![0u8; split];
  short.finalize_into(&mut prefix).unwrap();
  assert_eq!(&prefix[..], &fixed[..split]);

  if variant == Variant::Shake256 {
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    let mut h = sha3::Shake256::default();
    h.update(data);
    let mut expected = vec![0u8; out_len];
    h.finalize_xof().read(&mut expected);
    assert_eq!(fixed, expected);
  }
});
