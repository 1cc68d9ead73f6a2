//! aarch64 backend: Keccak-f[1600] on the ARMv8.2 SHA3 extension.
//!
//! Each lane lives in the low half of a `uint64x2_t` so theta, rho/pi, and
//! chi map onto EOR3, RAX1, XAR, and BCAX. Finalize is fused: pad, the last
//! permutation, and every squeeze permutation run inside one
//! `target_feature` region.
//!
//! # Safety
//!
//! Every function here requires the `sha3` CPU feature. Dispatch binds this
//! backend only when `platform::caps()` reports `aarch64::SHA3_READY`.

#![allow(clippy::indexing_slicing)] // fixed 25-lane state; `rate <= MAX_RATE`

use core::arch::aarch64::{
  uint64x2_t, vbcaxq_u64, vdupq_n_u64, veor3q_u64, veorq_u64, vgetq_lane_u64, vrax1q_u64, vxarq_u64,
};

use super::{BackendId, SpongeBackend};
use crate::{
  context::SpongeState,
  keccak::{self, KeccakState},
};

const RC: [u64; 24] = [
  0x0000_0000_0000_0001,
  0x0000_0000_0000_8082,
  0x8000_0000_0000_808a,
  0x8000_0000_8000_8000,
  0x0000_0000_0000_808b,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8009,
  0x0000_0000_0000_008a,
  0x0000_0000_0000_0088,
  0x0000_0000_8000_8009,
  0x0000_0000_8000_000a,
  0x0000_0000_8000_808b,
  0x8000_0000_0000_008b,
  0x8000_0000_0000_8089,
  0x8000_0000_0000_8003,
  0x8000_0000_0000_8002,
  0x8000_0000_0000_0080,
  0x0000_0000_0000_800a,
  0x8000_0000_8000_000a,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8080,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8008,
];

/// Keccak-f[1600] using EOR3/RAX1/XAR/BCAX.
///
/// # Safety
///
/// The CPU must support the `sha3` feature.
#[target_feature(enable = "neon,sha3")]
unsafe fn permute_sha3(state: &mut KeccakState) {
  // SAFETY: the caller guarantees `sha3` (and baseline `neon`) support, which
  // is all these intrinsics require; they touch registers only.
  unsafe {
    let mut a: [uint64x2_t; 25] = [vdupq_n_u64(0); 25];
    for (v, &lane) in a.iter_mut().zip(state.iter()) {
      *v = vdupq_n_u64(lane);
    }

    for &rc in &RC {
      // θ
      let c0 = veor3q_u64(veor3q_u64(a[0], a[5], a[10]), a[15], a[20]);
      let c1 = veor3q_u64(veor3q_u64(a[1], a[6], a[11]), a[16], a[21]);
      let c2 = veor3q_u64(veor3q_u64(a[2], a[7], a[12]), a[17], a[22]);
      let c3 = veor3q_u64(veor3q_u64(a[3], a[8], a[13]), a[18], a[23]);
      let c4 = veor3q_u64(veor3q_u64(a[4], a[9], a[14]), a[19], a[24]);

      let d0 = vrax1q_u64(c4, c1);
      let d1 = vrax1q_u64(c0, c2);
      let d2 = vrax1q_u64(c1, c3);
      let d3 = vrax1q_u64(c2, c4);
      let d4 = vrax1q_u64(c3, c0);

      // ρ + π: XAR rotates right, so each immediate is 64 minus the ρ offset.
      let b = [
        veorq_u64(a[0], d0),
        vxarq_u64::<20>(a[6], d1),
        vxarq_u64::<21>(a[12], d2),
        vxarq_u64::<43>(a[18], d3),
        vxarq_u64::<50>(a[24], d4),
        vxarq_u64::<36>(a[3], d3),
        vxarq_u64::<44>(a[9], d4),
        vxarq_u64::<61>(a[10], d0),
        vxarq_u64::<19>(a[16], d1),
        vxarq_u64::<3>(a[22], d2),
        vxarq_u64::<63>(a[1], d1),
        vxarq_u64::<58>(a[7], d2),
        vxarq_u64::<39>(a[13], d3),
        vxarq_u64::<56>(a[19], d4),
        vxarq_u64::<46>(a[20], d0),
        vxarq_u64::<37>(a[4], d4),
        vxarq_u64::<28>(a[5], d0),
        vxarq_u64::<54>(a[11], d1),
        vxarq_u64::<49>(a[17], d2),
        vxarq_u64::<8>(a[23], d3),
        vxarq_u64::<2>(a[2], d2),
        vxarq_u64::<9>(a[8], d3),
        vxarq_u64::<25>(a[14], d4),
        vxarq_u64::<23>(a[15], d0),
        vxarq_u64::<62>(a[21], d1),
      ];

      // χ: BCAX(x, y, z) = x ^ (y & !z)
      for row in (0..25).step_by(5) {
        a[row] = vbcaxq_u64(b[row], b[row + 2], b[row + 1]);
        a[row + 1] = vbcaxq_u64(b[row + 1], b[row + 3], b[row + 2]);
        a[row + 2] = vbcaxq_u64(b[row + 2], b[row + 4], b[row + 3]);
        a[row + 3] = vbcaxq_u64(b[row + 3], b[row], b[row + 4]);
        a[row + 4] = vbcaxq_u64(b[row + 4], b[row + 1], b[row]);
      }

      // ι
      a[0] = veorq_u64(a[0], vdupq_n_u64(rc));
    }

    for (lane, v) in state.iter_mut().zip(a.iter()) {
      *lane = vgetq_lane_u64::<0>(*v);
    }
  }
}

/// # Safety
///
/// The CPU must support the `sha3` feature.
#[target_feature(enable = "neon,sha3")]
unsafe fn absorb_sha3(state: &mut KeccakState, input: &[u8], rate: usize) -> usize {
  let mut blocks = input.chunks_exact(rate);
  for block in &mut blocks {
    keccak::xor_block(state, block);
    // SAFETY: inherited from this function's contract.
    unsafe { permute_sha3(state) };
  }
  blocks.remainder().len()
}

/// # Safety
///
/// The CPU must support the `sha3` feature.
#[target_feature(enable = "neon,sha3")]
unsafe fn finalize_sha3(sponge: &mut SpongeState, out: &mut [u8]) {
  let rate = sponge.rate;
  sponge.pad_final_block();
  keccak::xor_block(&mut sponge.a, &sponge.buf[..rate]);
  // SAFETY: inherited from this function's contract.
  unsafe { permute_sha3(&mut sponge.a) };

  let mut blocks = out.chunks_mut(rate).peekable();
  while let Some(block) = blocks.next() {
    keccak::extract(&sponge.a, block);
    if blocks.peek().is_some() {
      // SAFETY: inherited from this function's contract.
      unsafe { permute_sha3(&mut sponge.a) };
    }
  }
}

pub(crate) struct Aarch64Sha3;

impl SpongeBackend for Aarch64Sha3 {
  const ID: BackendId = BackendId::Aarch64Sha3;

  #[inline]
  fn absorb(state: &mut KeccakState, input: &[u8], rate: usize) -> usize {
    // SAFETY: this backend is only bound when `aarch64::SHA3_READY` was detected.
    unsafe { absorb_sha3(state, input, rate) }
  }

  #[inline]
  fn finalize(sponge: &mut SpongeState, out: &mut [u8]) {
    // SAFETY: this backend is only bound when `aarch64::SHA3_READY` was detected.
    unsafe { finalize_sha3(sponge, out) }
  }
}
