//! Keccak-f[1600] permutation adapter.
//!
//! The permutation itself comes from the `keccak` crate. This module only
//! moves bytes in and out of the 25-lane state (lane `x + 5y`, little-endian).

#![allow(clippy::indexing_slicing)] // Keccak state is fixed-size; indexing is audited

/// 1600-bit Keccak state as 25 little-endian 64-bit lanes.
pub type KeccakState = [u64; 25];

/// Size of the state in bytes.
pub const STATE_BYTES: usize = 200;

/// Apply Keccak-f[1600] in place.
#[inline(always)]
pub fn permute(state: &mut KeccakState) {
  ::keccak::f1600(state);
}

/// XOR `block` into the leading lanes of `state`.
///
/// `block.len()` must be a multiple of 8 and at most [`STATE_BYTES`].
#[inline(always)]
pub fn xor_block(state: &mut KeccakState, block: &[u8]) {
  debug_assert_eq!(block.len() % 8, 0);
  debug_assert!(block.len() <= STATE_BYTES);
  let (chunks, _) = block.as_chunks::<8>();
  for (lane, chunk) in state.iter_mut().zip(chunks) {
    *lane ^= u64::from_le_bytes(*chunk);
  }
}

/// Copy the leading `out.len()` bytes of `state` into `out`.
///
/// `out.len()` must be at most [`STATE_BYTES`].
#[inline(always)]
pub fn extract(state: &KeccakState, out: &mut [u8]) {
  debug_assert!(out.len() <= STATE_BYTES);
  let (chunks, rem) = out.as_chunks_mut::<8>();
  let full = chunks.len();
  for (chunk, lane) in chunks.iter_mut().zip(state.iter()) {
    *chunk = lane.to_le_bytes();
  }
  if !rem.is_empty() {
    let bytes = state[full].to_le_bytes();
    rem.copy_from_slice(&bytes[..rem.len()]);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Keccak-f[1600] applied once to the all-zero state.
  const ZERO_PERMUTED: KeccakState = [
    0xF1258F7940E1DDE7,
    0x84D5CCF933C0478A,
    0xD598261EA65AA9EE,
    0xBD1547306F80494D,
    0x8B284E056253D057,
    0xFF97A42D7F8E6FD4,
    0x90FEE5A0A44647C4,
    0x8C5BDA0CD6192E76,
    0xAD30A6F71B19059C,
    0x30935AB7D08FFC64,
    0xEB5AA93F2317D635,
    0xA9A6E6260D712103,
    0x81A57C16DBCF555F,
    0x43B831CD0347C826,
    0x01F22F1A11A5569F,
    0x05E5635A21D9AE61,
    0x64BEFEF28CC970F2,
    0x613670957BC46611,
    0xB87C5A554FD00ECB,
    0x8C3EE88A1CCF32C8,
    0x940C7922AE3A2614,
    0x1841F924A2C509E4,
    0x16F53526E70465C2,
    0x75F644E97F30A13B,
    0xEAF1FF7B5CECA249,
  ];

  #[test]
  fn permute_zero_state_matches_known_vector() {
    let mut st = [0u64; 25];
    permute(&mut st);
    assert_eq!(st, ZERO_PERMUTED);
  }

  #[test]
  fn xor_block_is_little_endian_per_lane() {
    let mut st = [0u64; 25];
    let mut block = [0u8; 16];
    block[0] = 0x01;
    block[15] = 0x80;
    xor_block(&mut st, &block);
    assert_eq!(st[0], 1);
    assert_eq!(st[1], 0x8000_0000_0000_0000);
    assert!(st[2..].iter().all(|&l| l == 0));
  }

  #[test]
  fn extract_handles_partial_lanes() {
    let mut st = [0u64; 25];
    st[0] = 0x0807_0605_0403_0201;
    st[1] = 0x100F_0E0D_0C0B_0A09;
    let mut out = [0u8; 11];
    extract(&st, &mut out);
    assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
  }

  #[test]
  fn extract_inverts_xor_block_on_zero_state() {
    let mut st = [0u64; 25];
    let block: [u8; 168] = core::array::from_fn(|i| i as u8);
    xor_block(&mut st, &block);
    let mut out = [0u8; 168];
    extract(&st, &mut out);
    assert_eq!(out, block);
  }
}
