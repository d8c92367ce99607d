//! CMAC (Cipher-based Message Authentication Code).
//!
//! One-shot CMAC over AES as defined in NIST SP 800-38B and RFC 4493.
//! The whole message is supplied up front; there is no incremental API.

use crate::aes::{AesKey, AES_BLOCK_SIZE};
use crate::gf128::{self, NativeWord};
use symcipher_types::CryptoError;
use zeroize::Zeroize;

/// Maximum CMAC tag size in bytes (the full accumulator).
pub const CMAC_TAG_SIZE: usize = 16;

/// GF(2^128) doubling: left shift by one bit, folding Rb (0x87) into the
/// last byte when the shifted-out bit was set. This is the subkey
/// derivation step of SP 800-38B, distinct from the GHASH multiply but
/// built on the same shift primitive.
fn dbl(block: &mut [u8; AES_BLOCK_SIZE]) {
    if gf128::shl1::<NativeWord>(block) {
        block[AES_BLOCK_SIZE - 1] ^= 0x87;
    }
}

/// Compute the CMAC of `msg`, writing the most-significant `tag.len()`
/// bytes of the result; lengths from 0 to 16 are accepted.
pub fn cmac_compute(key: &AesKey, msg: &[u8], tag: &mut [u8]) -> Result<(), CryptoError> {
    if tag.len() > CMAC_TAG_SIZE {
        return Err(CryptoError::InvalidTagLength);
    }

    // K1 = dbl(E_K(0^128)), K2 = dbl(K1)
    let mut k1 = [0u8; AES_BLOCK_SIZE];
    key.encrypt_block(&mut k1)?;
    dbl(&mut k1);
    let mut k2 = k1;
    dbl(&mut k2);

    // Partition into n blocks, at least one even for an empty message.
    let n = msg.len().div_ceil(AES_BLOCK_SIZE).max(1);

    let mut state = [0u8; AES_BLOCK_SIZE];
    for block in msg[..(n - 1) * AES_BLOCK_SIZE].chunks_exact(AES_BLOCK_SIZE) {
        for (s, &b) in state.iter_mut().zip(block.iter()) {
            *s ^= b;
        }
        key.encrypt_block(&mut state)?;
    }

    // Final block: complete blocks XOR K1; partial blocks get 10* padding
    // and XOR K2.
    let rest = &msg[(n - 1) * AES_BLOCK_SIZE..];
    let mut last = [0u8; AES_BLOCK_SIZE];
    last[..rest.len()].copy_from_slice(rest);
    if rest.len() == AES_BLOCK_SIZE {
        gf128::xor_block::<NativeWord>(&mut last, &k1);
    } else {
        last[rest.len()] = 0x80;
        gf128::xor_block::<NativeWord>(&mut last, &k2);
    }

    gf128::xor_block::<NativeWord>(&mut state, &last);
    key.encrypt_block(&mut state)?;

    tag.copy_from_slice(&state[..tag.len()]);

    k1.zeroize();
    k2.zeroize();
    state.zeroize();
    Ok(())
}
