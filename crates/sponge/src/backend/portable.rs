//! Portable backend: the `keccak` crate permutation, one block at a time.

#![allow(clippy::indexing_slicing)] // `rate <= MAX_RATE` is a context invariant

use super::{BackendId, SpongeBackend};
use crate::{
  context::SpongeState,
  keccak::{self, KeccakState},
};

pub(crate) struct Portable;

impl SpongeBackend for Portable {
  const ID: BackendId = BackendId::Portable;

  #[inline]
  fn absorb(state: &mut KeccakState, input: &[u8], rate: usize) -> usize {
    let mut blocks = input.chunks_exact(rate);
    for block in &mut blocks {
      keccak::xor_block(state, block);
      keccak::permute(state);
    }
    blocks.remainder().len()
  }

  fn finalize(sponge: &mut SpongeState, out: &mut [u8]) {
    let rate = sponge.rate;
    sponge.pad_final_block();
    keccak::xor_block(&mut sponge.a, &sponge.buf[..rate]);
    keccak::permute(&mut sponge.a);

    let mut blocks = out.chunks_mut(rate).peekable();
    while let Some(block) = blocks.next() {
      keccak::extract(&sponge.a, block);
      if blocks.peek().is_some() {
        keccak::permute(&mut sponge.a);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absorb_reports_tail() {
    let mut st = [0u64; 25];
    assert_eq!(Portable::absorb(&mut st, &[0u8; 10], 136), 10);
    assert_eq!(st, [0u64; 25]);
    assert_eq!(Portable::absorb(&mut st, &[0u8; 136 * 2 + 5], 136), 5);
    assert_ne!(st, [0u64; 25]);
  }

  #[test]
  fn absorb_matches_manual_permutation() {
    let data: [u8; 144] = core::array::from_fn(|i| i as u8);
    let mut st = [0u64; 25];
    assert_eq!(Portable::absorb(&mut st, &data, 144), 0);

    let mut expected = [0u64; 25];
    keccak::xor_block(&mut expected, &data);
    keccak::permute(&mut expected);
    assert_eq!(st, expected);
  }
}
