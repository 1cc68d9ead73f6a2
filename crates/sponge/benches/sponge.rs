use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sponge::{Keccak256, Kmac256, Sha3_256, Sha3_512, Shake128, SpongeContext, Variant, backend::kernel_test};
use traits::{Digest as _, Xof as _};

fn inputs() -> Vec<(usize, Vec<u8>)> {
  // Below, at, and just past one SHA3-256 block, then throughput sizes.
  let sizes = [0usize, 1, 32, 135, 136, 137, 1024, 16 * 1024, 1024 * 1024];
  sizes
    .into_iter()
    .map(|len| {
      let mut v = vec![0u8; len];
      for (i, b) in v.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(31).wrapping_add(7);
      }
      (len, v)
    })
    .collect()
}

fn oneshot(c: &mut Criterion) {
  let inputs = inputs();
  let mut group = c.benchmark_group("sponge/oneshot");

  for (len, data) in &inputs {
    group.throughput(Throughput::Bytes(*len as u64));

    group.bench_with_input(BenchmarkId::new("sha3_256", len), data, |b, d| {
      b.iter(|| black_box(Sha3_256::digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("sha3_512", len), data, |b, d| {
      b.iter(|| black_box(Sha3_512::digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("keccak256", len), data, |b, d| {
      b.iter(|| black_box(Keccak256::digest(black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("shake128/32B", len), data, |b, d| {
      b.iter(|| {
        let mut out = [0u8; 32];
        Shake128::hash_into(black_box(d), &mut out);
        black_box(out)
      })
    });
    group.bench_with_input(BenchmarkId::new("kmac256/32B", len), data, |b, d| {
      b.iter(|| {
        let mut mac = Kmac256::new(b"bench key", b"");
        mac.update(black_box(d));
        let mut out = [0u8; 32];
        mac.finalize_into(&mut out);
        black_box(out)
      })
    });
  }

  group.finish();
}

fn streaming(c: &mut Criterion) {
  let mut group = c.benchmark_group("sponge/streaming");
  let data = vec![0u8; 1024 * 1024];
  group.throughput(Throughput::Bytes(data.len() as u64));

  for chunk in [1usize, 64, 136, 4096] {
    group.bench_function(format!("sha3_256/{chunk}B-chunks"), |b| {
      b.iter(|| {
        let mut ctx = SpongeContext::new(Variant::Sha3_256);
        for part in black_box(&data).chunks(chunk) {
          let _ = ctx.update(part);
        }
        let mut out = [0u8; 32];
        let _ = ctx.finalize_into(&mut out);
        black_box(out)
      })
    });
  }

  group.finish();
}

fn squeeze(c: &mut Criterion) {
  let mut group = c.benchmark_group("sponge/squeeze");
  let len = 64 * 1024;
  group.throughput(Throughput::Bytes(len as u64));

  group.bench_function("shake128/reader", |b| {
    let mut out = vec![0u8; len];
    b.iter(|| {
      let mut h = Shake128::new();
      h.update(b"seed");
      h.finalize_xof().squeeze(black_box(&mut out));
    })
  });

  group.finish();
}

fn backends(c: &mut Criterion) {
  let mut group = c.benchmark_group("sponge/backends");
  let data = vec![0xA5u8; 16 * 1024];
  group.throughput(Throughput::Bytes(data.len() as u64));

  for v in [Variant::Sha3_256, Variant::Shake128] {
    group.bench_with_input(BenchmarkId::new("all", v.name()), &data, |b, d| {
      b.iter(|| black_box(kernel_test::run_all_backends(v, black_box(d), 32)))
    });
  }

  group.finish();
}

criterion_group!(benches, oneshot, streaming, squeeze, backends);
criterion_main!(benches);
