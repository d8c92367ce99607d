//! Cross-mode integration tests: every mode drives one shared key context
//! and the key schedule stays bit-identical throughout.

use symcipher_crypto::aes::AesKey;
use symcipher_crypto::cmac::cmac_compute;
use symcipher_crypto::modes::ecb::{ecb_decrypt, ecb_encrypt};
use symcipher_crypto::modes::gcm::{gcm_decrypt, gcm_encrypt};
use symcipher_crypto::modes::wrap::{key_unwrap, key_wrap};

fn test_keys() -> Vec<AesKey> {
    vec![
        AesKey::new(&[0x2bu8; 16]).unwrap(),
        AesKey::new(&[0x8eu8; 24]).unwrap(),
        AesKey::new(&[0x60u8; 32]).unwrap(),
    ]
}

#[test]
fn one_key_context_drives_all_modes() {
    for key in test_keys() {
        let msg: Vec<u8> = (0u8..48).collect();

        let mut ecb_buf = msg.clone();
        ecb_encrypt(&key, &mut ecb_buf).unwrap();
        ecb_decrypt(&key, &mut ecb_buf).unwrap();
        assert_eq!(ecb_buf, msg);

        let mut gcm_buf = msg.clone();
        let mut tag = [0u8; 16];
        gcm_encrypt(&key, &[7u8; 12], b"aad", &mut gcm_buf, &mut tag).unwrap();
        gcm_decrypt(&key, &[7u8; 12], b"aad", &mut gcm_buf, &tag).unwrap();
        assert_eq!(gcm_buf, msg);

        let mut mac = [0u8; 16];
        cmac_compute(&key, &msg, &mut mac).unwrap();

        let mut wrapped = vec![0u8; msg.len() + 8];
        key_wrap(&key, &mut wrapped, &msg, None).unwrap();
        let mut unwrapped = vec![0u8; msg.len()];
        key_unwrap(&key, &mut unwrapped, &wrapped, None).unwrap();
        assert_eq!(unwrapped, msg);

        // The schedule must be untouched: the first operation repeated
        // still produces the same bytes.
        let mut mac2 = [0u8; 16];
        cmac_compute(&key, &msg, &mut mac2).unwrap();
        assert_eq!(mac, mac2);
    }
}

#[test]
fn gcm_roundtrip_block_boundary_sizes() {
    let key = AesKey::new(&[0x41u8; 16]).unwrap();
    for size in [0usize, 1, 15, 16, 17, 31, 32, 33, 63, 64, 255] {
        let pt: Vec<u8> = (0..size).map(|i| i as u8).collect();
        let mut buf = pt.clone();
        let mut tag = [0u8; 16];
        gcm_encrypt(&key, &[3u8; 12], &[], &mut buf, &mut tag).unwrap();
        gcm_decrypt(&key, &[3u8; 12], &[], &mut buf, &tag).unwrap();
        assert_eq!(buf, pt, "size {size}");
    }
}

#[test]
fn gcm_both_j0_paths_are_independent() {
    // The same plaintext under a 12-byte IV and a hashed-IV length must
    // verify under its own IV and fail under the other.
    let key = AesKey::new(&[0x77u8; 16]).unwrap();
    let pt = b"two counter derivations".to_vec();

    let mut ct_a = pt.clone();
    let mut tag_a = [0u8; 16];
    gcm_encrypt(&key, &[1u8; 12], &[], &mut ct_a, &mut tag_a).unwrap();

    let mut ct_b = pt.clone();
    let mut tag_b = [0u8; 16];
    gcm_encrypt(&key, &[1u8; 16], &[], &mut ct_b, &mut tag_b).unwrap();

    assert_ne!(ct_a, ct_b);

    let mut buf = ct_a.clone();
    assert!(gcm_decrypt(&key, &[1u8; 16], &[], &mut buf, &tag_a).is_err());
    let mut buf = ct_b.clone();
    gcm_decrypt(&key, &[1u8; 16], &[], &mut buf, &tag_b).unwrap();
    assert_eq!(buf, pt);
}

#[test]
fn ecb_partial_tail_is_prefix_of_padded_encryption() {
    let key = AesKey::new(&[0x10u8; 16]).unwrap();
    for size in [17usize, 30, 47] {
        let pt: Vec<u8> = (0..size).map(|i| (i * 7) as u8).collect();

        let mut short = pt.clone();
        ecb_encrypt(&key, &mut short).unwrap();

        let mut padded = pt.clone();
        padded.resize(size.next_multiple_of(16), 0);
        ecb_encrypt(&key, &mut padded).unwrap();

        assert_eq!(short[..], padded[..size]);
    }
}

#[test]
fn wrap_grows_by_one_half_block() {
    let key = AesKey::new(&[0x09u8; 32]).unwrap();
    for chunks in 1usize..=5 {
        let data = vec![0xd1u8; chunks * 8];
        let mut wrapped = vec![0u8; data.len() + 8];
        key_wrap(&key, &mut wrapped, &data, None).unwrap();
        assert_eq!(wrapped.len(), data.len() + 8);
        assert_ne!(&wrapped[8..], &data[..]);
    }
}

#[test]
fn tags_depend_on_every_input() {
    let key = AesKey::new(&[0xeeu8; 16]).unwrap();
    let base = b"authenticated payload".to_vec();

    let mut buf = base.clone();
    let mut tag = [0u8; 16];
    gcm_encrypt(&key, &[5u8; 12], b"aad", &mut buf, &mut tag).unwrap();

    // Different AAD, different tag.
    let mut buf2 = base.clone();
    let mut tag2 = [0u8; 16];
    gcm_encrypt(&key, &[5u8; 12], b"bad", &mut buf2, &mut tag2).unwrap();
    assert_eq!(buf, buf2);
    assert_ne!(tag, tag2);

    // Different IV, different keystream and tag.
    let mut buf3 = base.clone();
    let mut tag3 = [0u8; 16];
    gcm_encrypt(&key, &[6u8; 12], b"aad", &mut buf3, &mut tag3).unwrap();
    assert_ne!(buf, buf3);
    assert_ne!(tag, tag3);
}
