#![no_main]
use libfuzzer_sys::fuzz_target;
use symcipher_crypto::aes::AesKey;
use symcipher_crypto::modes::wrap::{key_unwrap, key_wrap};

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }
    let (key_bytes, payload) = data.split_at(16);
    let payload = &payload[..payload.len() & !7];
    if payload.is_empty() {
        return;
    }

    let key = AesKey::new(key_bytes).unwrap();
    let mut wrapped = vec![0u8; payload.len() + 8];
    key_wrap(&key, &mut wrapped, payload, None).unwrap();

    let mut unwrapped = vec![0u8; payload.len()];
    key_unwrap(&key, &mut unwrapped, &wrapped, None).unwrap();
    assert_eq!(unwrapped, payload);

    // Corrupting any wrapped byte must fail the integrity check.
    wrapped[payload.len() % wrapped.len()] ^= 0x80;
    assert!(key_unwrap(&key, &mut unwrapped, &wrapped, None).is_err());
});
