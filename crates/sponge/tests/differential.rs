use proptest::prelude::*;
use sponge::{
  CShake128, CShake256, Keccak224, Keccak256, Keccak384, Keccak512, Kmac128, Kmac256, Sha3_224, Sha3_256, Sha3_384,
  Sha3_512, Shake128, Shake256, SpongeContext, Variant,
};
use traits::{Digest as _, Xof as _};

fn ref_fixed<D: sha3::Digest>(data: &[u8]) -> Vec<u8> {
  D::digest(data).to_vec()
}

fn ref_xof<H: Default + sha3::digest::Update + sha3::digest::ExtendableOutput>(data: &[u8], out_len: usize) -> Vec<u8> {
  use sha3::digest::XofReader as _;
  let mut h = H::default();
  h.update(data);
  let mut out = vec![0u8; out_len];
  h.finalize_xof().read(&mut out);
  out
}

fn chunked<D: traits::Digest>(data: &[u8]) -> D::Output {
  let mut h = D::new();
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 97) + 1;
    let end = core::cmp::min(data.len(), i + step);
    h.update(&data[i..end]);
    i = end;
  }
  h.finalize()
}

proptest! {
  #[test]
  fn sha3_family_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(Sha3_224::digest(&data).to_vec(), ref_fixed::<sha3::Sha3_224>(&data));
    prop_assert_eq!(Sha3_256::digest(&data).to_vec(), ref_fixed::<sha3::Sha3_256>(&data));
    prop_assert_eq!(Sha3_384::digest(&data).to_vec(), ref_fixed::<sha3::Sha3_384>(&data));
    prop_assert_eq!(Sha3_512::digest(&data).to_vec(), ref_fixed::<sha3::Sha3_512>(&data));
  }

  #[test]
  fn keccak_family_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(Keccak224::digest(&data).to_vec(), ref_fixed::<sha3::Keccak224>(&data));
    prop_assert_eq!(Keccak256::digest(&data).to_vec(), ref_fixed::<sha3::Keccak256>(&data));
    prop_assert_eq!(Keccak384::digest(&data).to_vec(), ref_fixed::<sha3::Keccak384>(&data));
    prop_assert_eq!(Keccak512::digest(&data).to_vec(), ref_fixed::<sha3::Keccak512>(&data));
  }

  #[test]
  fn streaming_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(chunked::<Sha3_256>(&data).to_vec(), ref_fixed::<sha3::Sha3_256>(&data));
    prop_assert_eq!(chunked::<Sha3_512>(&data).to_vec(), ref_fixed::<sha3::Sha3_512>(&data));
    prop_assert_eq!(chunked::<Keccak256>(&data).to_vec(), ref_fixed::<sha3::Keccak256>(&data));
  }

  #[test]
  fn shake_matches_sha3_crate(
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 0usize..1024,
    split in any::<usize>(),
  ) {
    let split = if out_len == 0 { 0 } else { split % (out_len + 1) };

    let mut ours = vec![0u8; out_len];
    Shake128::hash_into(&data, &mut ours);
    prop_assert_eq!(&ours, &ref_xof::<sha3::Shake128>(&data, out_len));

    let mut h = Shake256::new();
    h.update(&data);
    let mut reader = h.finalize_xof();
    reader.squeeze(&mut ours[..split]);
    reader.squeeze(&mut ours[split..]);
    prop_assert_eq!(&ours, &ref_xof::<sha3::Shake256>(&data, out_len));
  }

  #[test]
  fn context_output_len_matches_sha3_crate(
    data in proptest::collection::vec(any::<u8>(), 0..1024),
    out_len in 0usize..600,
  ) {
    let mut ctx = SpongeContext::new(Variant::Shake128);
    ctx.set_output_len(out_len).unwrap();
    ctx.update(&data).unwrap();
    let mut ours = vec![0u8; out_len];
    prop_assert_eq!(ctx.finalize_into(&mut ours), Ok(out_len));
    prop_assert_eq!(ours, ref_xof::<sha3::Shake128>(&data, out_len));
  }

  #[test]
  fn kmac_matches_tiny_keccak(
    key in proptest::collection::vec(any::<u8>(), 0..64),
    customization in proptest::collection::vec(any::<u8>(), 0..64),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 0usize..512,
  ) {
    use tiny_keccak::{Hasher, Kmac};

    let mut expected = vec![0u8; out_len];
    let mut r = Kmac::v128(&key, &customization);
    r.update(&data);
    r.finalize(&mut expected);

    let mut actual = vec![0u8; out_len];
    let mut h = Kmac128::new(&key, &customization);
    h.update(&data);
    h.finalize_into(&mut actual);
    prop_assert_eq!(&actual, &expected);

    let mut r = Kmac::v256(&key, &customization);
    r.update(&data);
    r.finalize(&mut expected);

    let mut h = Kmac256::new(&key, &customization);
    h.update(&data);
    h.finalize_into(&mut actual);
    prop_assert_eq!(&actual, &expected);
  }

  #[test]
  fn kmacxof_matches_tiny_keccak(
    key in proptest::collection::vec(any::<u8>(), 0..64),
    customization in proptest::collection::vec(any::<u8>(), 0..64),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 0usize..512,
    split in any::<usize>(),
  ) {
    use tiny_keccak::{Hasher, IntoXof, Kmac, Xof};

    let split = if out_len == 0 { 0 } else { split % (out_len + 1) };

    let mut expected = vec![0u8; out_len];
    let mut r = Kmac::v128(&key, &customization);
    r.update(&data);
    r.into_xof().squeeze(&mut expected);

    let mut actual = vec![0u8; out_len];
    let mut h = Kmac128::new(&key, &customization);
    h.update(&data);
    let mut reader = h.finalize_xof();
    sponge::traits::Xof::squeeze(&mut reader, &mut actual[..split]);
    sponge::traits::Xof::squeeze(&mut reader, &mut actual[split..]);
    prop_assert_eq!(&actual, &expected);

    let mut r = Kmac::v256(&key, &customization);
    r.update(&data);
    r.into_xof().squeeze(&mut expected);

    let mut h = Kmac256::new(&key, &customization);
    h.update(&data);
    sponge::traits::Xof::squeeze(&mut h.finalize_xof(), &mut actual);
    prop_assert_eq!(&actual, &expected);
  }

  #[test]
  fn cshake_matches_tiny_keccak(
    function_name in proptest::collection::vec(any::<u8>(), 0..32),
    customization in proptest::collection::vec(any::<u8>(), 1..64),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 0usize..512,
  ) {
    use tiny_keccak::{CShake, Hasher};

    let mut expected = vec![0u8; out_len];
    let mut r = CShake::v128(&function_name, &customization);
    r.update(&data);
    r.finalize(&mut expected);

    let mut actual = vec![0u8; out_len];
    CShake128::hash_into(&function_name, &customization, &data, &mut actual);
    prop_assert_eq!(&actual, &expected);

    let mut r = CShake::v256(&function_name, &customization);
    r.update(&data);
    r.finalize(&mut expected);

    let mut h = CShake256::new(&function_name, &customization);
    h.update(&data);
    sponge::traits::Xof::squeeze(&mut h.finalize_xof(), &mut actual);
    prop_assert_eq!(&actual, &expected);
  }
}
