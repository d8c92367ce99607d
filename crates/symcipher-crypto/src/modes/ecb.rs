//! ECB (Electronic Codebook) mode of operation.
//!
//! **Security warning**: ECB mode does not provide semantic security —
//! identical plaintext blocks produce identical ciphertext blocks. It is
//! provided for completeness and specific low-level use cases only.
//!
//! A final chunk shorter than a block is transformed through a zero-padded
//! local block and written back at its original length; no padding ever
//! reaches the output, so callers wanting invertibility across partial
//! blocks must apply their own padding scheme first.

use crate::aes::{AesKey, AES_BLOCK_SIZE};
use symcipher_types::CryptoError;

/// Encrypt a buffer in place using ECB mode with AES.
///
/// Any input length is accepted; an empty buffer is a no-op.
pub fn ecb_encrypt(key: &AesKey, data: &mut [u8]) -> Result<(), CryptoError> {
    for chunk in data.chunks_mut(AES_BLOCK_SIZE) {
        if chunk.len() == AES_BLOCK_SIZE {
            key.encrypt_block(chunk)?;
        } else {
            let mut state = [0u8; AES_BLOCK_SIZE];
            state[..chunk.len()].copy_from_slice(chunk);
            key.encrypt_block(&mut state)?;
            chunk.copy_from_slice(&state[..chunk.len()]);
        }
    }
    Ok(())
}

/// Decrypt a buffer in place using ECB mode with AES.
pub fn ecb_decrypt(key: &AesKey, data: &mut [u8]) -> Result<(), CryptoError> {
    for chunk in data.chunks_mut(AES_BLOCK_SIZE) {
        if chunk.len() == AES_BLOCK_SIZE {
            key.decrypt_block(chunk)?;
        } else {
            let mut state = [0u8; AES_BLOCK_SIZE];
            state[..chunk.len()].copy_from_slice(chunk);
            key.decrypt_block(&mut state)?;
            chunk.copy_from_slice(&state[..chunk.len()]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    // NIST SP 800-38A F.1.1: AES-128 ECB
    #[test]
    fn test_ecb_aes128() {
        let key = AesKey::new(&hex_to_bytes("2b7e151628aed2a6abf7158809cf4f3c")).unwrap();
        let pt = hex_to_bytes("6bc1bee22e409f96e93d7e117393172a");
        let expected = "3ad77bb40d7a3660a89ecaf32466ef97";

        let mut data = pt.clone();
        ecb_encrypt(&key, &mut data).unwrap();
        assert_eq!(hex(&data), expected);

        ecb_decrypt(&key, &mut data).unwrap();
        assert_eq!(data, pt);
    }

    // NIST SP 800-38A F.1.5: AES-256 ECB, all four blocks
    #[test]
    fn test_ecb_aes256_multi_block() {
        let key = AesKey::new(&hex_to_bytes(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        ))
        .unwrap();
        let pt = hex_to_bytes(
            "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710",
        );
        let expected = "f3eed1bdb5d2a03c064b5a7e3db181f8591ccb10d410ed26dc5ba74a31362870b6ed21b99ca6f4f9f153e7b1beafed1d23304b7a39f9f3ff067d8d8f9e24ecc7";

        let mut data = pt.clone();
        ecb_encrypt(&key, &mut data).unwrap();
        assert_eq!(hex(&data), expected);

        ecb_decrypt(&key, &mut data).unwrap();
        assert_eq!(data, pt);
    }

    // Identical plaintext blocks map to identical ciphertext blocks.
    #[test]
    fn test_ecb_repeating_blocks() {
        let key = AesKey::new(&[0x5au8; 16]).unwrap();
        let mut data = [0x33u8; 32];
        ecb_encrypt(&key, &mut data).unwrap();
        let (first, second) = data.split_at(16);
        assert_eq!(first, second);
    }

    // A partial final chunk is the truncation of encrypting its zero-padded
    // block; the information lost to truncation is the caller's padding
    // problem, not ECB's.
    #[test]
    fn test_ecb_partial_final_chunk() {
        let key = AesKey::new(&[0x07u8; 24]).unwrap();

        let mut padded = [0u8; 32];
        padded[16..21].copy_from_slice(b"hello");
        ecb_encrypt(&key, &mut padded).unwrap();

        let mut short = [0u8; 21];
        short[16..].copy_from_slice(b"hello");
        ecb_encrypt(&key, &mut short).unwrap();

        assert_eq!(&short[..21], &padded[..21]);
    }

    #[test]
    fn test_ecb_empty_input() {
        let key = AesKey::new(&[0u8; 16]).unwrap();
        let mut data: [u8; 0] = [];
        assert!(ecb_encrypt(&key, &mut data).is_ok());
        assert!(ecb_decrypt(&key, &mut data).is_ok());
    }

    // Round trip across key sizes for block-aligned input.
    #[test]
    fn test_ecb_roundtrip_all_key_sizes() {
        for key_bytes in [16usize, 24, 32] {
            let key = AesKey::new(&vec![0xc4u8; key_bytes]).unwrap();
            let pt: Vec<u8> = (0u8..48).collect();
            let mut data = pt.clone();
            ecb_encrypt(&key, &mut data).unwrap();
            assert_ne!(data, pt);
            ecb_decrypt(&key, &mut data).unwrap();
            assert_eq!(data, pt);
        }
    }
}
