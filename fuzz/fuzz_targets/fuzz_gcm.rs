#![no_main]
use libfuzzer_sys::fuzz_target;
use symcipher_crypto::aes::AesKey;
use symcipher_crypto::modes::gcm::{gcm_decrypt, gcm_encrypt};

fuzz_target!(|data: &[u8]| {
    // Layout: 16-byte key, 13-byte IV (forces the GHASH J0 path), rest split
    // between AAD and plaintext.
    if data.len() < 30 {
        return;
    }
    let (key_bytes, rest) = data.split_at(16);
    let (iv, rest) = rest.split_at(13);
    let (aad, msg) = rest.split_at(rest.len() / 2);

    let key = AesKey::new(key_bytes).unwrap();
    let mut buf = msg.to_vec();
    let mut tag = [0u8; 16];
    gcm_encrypt(&key, iv, aad, &mut buf, &mut tag).unwrap();
    gcm_decrypt(&key, iv, aad, &mut buf, &tag).unwrap();
    assert_eq!(buf, msg);

    // Any tag bit flip must be rejected.
    let mut bad_tag = tag;
    bad_tag[0] ^= 0x01;
    assert!(gcm_decrypt(&key, iv, aad, &mut buf, &bad_tag).is_err());
});
