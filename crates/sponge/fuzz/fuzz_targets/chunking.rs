#![no_main]

use libfuzzer_sys::fuzz_target;
use sponge::{SpongeContext, Variant};

fuzz_target!(|input: &[u8]| {
  // Layout:
  // - 1 byte: variant index
  // - 1 byte: chunk step seed
  // - rest: data
  let Some((&sel, rest)) = input.split_first() else {
    return;
  };
  let Some((&step_seed, data)) = rest.split_first() else {
    return;
  };
  let variant = Variant::ALL[sel as usize % Variant::ALL.len()];

  let mut whole = SpongeContext::new(variant);
  whole.update(data).unwrap();
  let mut expected = vec![0u8; whole.output_len()];
  whole.finalize_into(&mut expected).unwrap();

  let mut ctx = SpongeContext::new(variant);
  let mut fork = None;
  let mut i = 0usize;
  let mut step = step_seed as usize;
  while i < data.len() {
    step = (step * 33 + 17) % 211 + 1;
    let end = core::cmp::min(data.len(), i + step);
    ctx.update(&data[i..end]).unwrap();
    assert!(ctx.buffered() < ctx.block_size());
    if fork.is_none() && i * 2 >= data.len() {
      fork = Some((ctx.clone(), end));
    }
    i = end;
  }
  let mut streamed = vec![0u8; ctx.output_len()];
  ctx.finalize_into(&mut streamed).unwrap();
  assert_eq!(streamed, expected);

  // A duplicate taken mid-stream finishes the same message identically.
  if let Some((mut dup, at)) = fork {
    dup.update(&data[at..]).unwrap();
    let mut out = vec![0u8; dup.output_len()];
    dup.finalize_into(&mut out).unwrap();
    assert_eq!(out, expected);
  }

  if variant == Variant::Sha3_256 {
    use sha3::Digest as _;
    assert_eq!(&expected[..], &sha3::Sha3_256::digest(data)[..]);
  }
  if variant == Variant::Keccak256 {
    use sha3::Digest as _;
    assert_eq!(&expected[..], &sha3::Keccak256::digest(data)[..]);
  }
});
