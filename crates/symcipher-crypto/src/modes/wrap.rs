//! AES Key Wrap (RFC 3394).
//!
//! Wraps key material in 64-bit half-blocks through six rounds of the block
//! cipher, binding an integrity-check value into the output. Unwrap runs
//! the mirror sequence and verifies the recovered integrity register
//! against the IV; on mismatch the output must be discarded by the caller.

use crate::aes::{AesKey, AES_BLOCK_SIZE};
use subtle::ConstantTimeEq;
use symcipher_types::CryptoError;

/// Key wrap works on 64-bit half-blocks.
pub const WRAP_BLOCK_SIZE: usize = 8;

/// Default integrity-check IV from RFC 3394 section 2.2.3.1.
const DEFAULT_IV: [u8; WRAP_BLOCK_SIZE] = [0xa6; WRAP_BLOCK_SIZE];

const WRAP_ROUNDS: u64 = 6;

fn check_out_len(out: &[u8], need: usize) -> Result<(), CryptoError> {
    if out.len() < need {
        return Err(CryptoError::BufferTooSmall {
            need,
            got: out.len(),
        });
    }
    if out.len() != need {
        return Err(CryptoError::InvalidArg);
    }
    Ok(())
}

/// Wrap `input` key material into `out` (RFC 3394 section 2.2.1).
///
/// `input` must be a multiple of 8 bytes and at least 8 bytes; `out` must
/// be exactly 8 bytes longer than `input`. `iv` overrides the default
/// integrity-check value `A6A6A6A6A6A6A6A6`.
pub fn key_wrap(
    key: &AesKey,
    out: &mut [u8],
    input: &[u8],
    iv: Option<&[u8; WRAP_BLOCK_SIZE]>,
) -> Result<(), CryptoError> {
    if input.len() < WRAP_BLOCK_SIZE || input.len() % WRAP_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidArg);
    }
    check_out_len(out, input.len() + WRAP_BLOCK_SIZE)?;

    let n = input.len() / WRAP_BLOCK_SIZE;
    out[WRAP_BLOCK_SIZE..].copy_from_slice(input);

    // B holds A in the high half and the current chunk in the low half.
    let mut b = [0u8; AES_BLOCK_SIZE];
    b[..WRAP_BLOCK_SIZE].copy_from_slice(iv.unwrap_or(&DEFAULT_IV));

    let mut t: u64 = 1;
    for _ in 0..WRAP_ROUNDS {
        for i in 0..n {
            let r = WRAP_BLOCK_SIZE * (i + 1);
            b[WRAP_BLOCK_SIZE..].copy_from_slice(&out[r..r + WRAP_BLOCK_SIZE]);
            key.encrypt_block(&mut b)?;
            for (a, s) in b[..WRAP_BLOCK_SIZE].iter_mut().zip(t.to_be_bytes()) {
                *a ^= s;
            }
            t += 1;
            out[r..r + WRAP_BLOCK_SIZE].copy_from_slice(&b[WRAP_BLOCK_SIZE..]);
        }
    }

    out[..WRAP_BLOCK_SIZE].copy_from_slice(&b[..WRAP_BLOCK_SIZE]);
    Ok(())
}

/// Unwrap `input` into `out` and verify integrity (RFC 3394 section 2.2.2).
///
/// `input` must be a multiple of 8 bytes and at least 16 bytes; `out` must
/// be exactly 8 bytes shorter than `input`. Returns
/// [`CryptoError::KeyWrapIntegrityFail`] when the recovered register does
/// not match the IV; `out` has been written by then and must be discarded.
pub fn key_unwrap(
    key: &AesKey,
    out: &mut [u8],
    input: &[u8],
    iv: Option<&[u8; WRAP_BLOCK_SIZE]>,
) -> Result<(), CryptoError> {
    if input.len() < AES_BLOCK_SIZE || input.len() % WRAP_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidArg);
    }
    check_out_len(out, input.len() - WRAP_BLOCK_SIZE)?;

    let n = out.len() / WRAP_BLOCK_SIZE;
    out.copy_from_slice(&input[WRAP_BLOCK_SIZE..]);

    let mut b = [0u8; AES_BLOCK_SIZE];
    b[..WRAP_BLOCK_SIZE].copy_from_slice(&input[..WRAP_BLOCK_SIZE]);

    let mut t: u64 = WRAP_ROUNDS * n as u64;
    for _ in 0..WRAP_ROUNDS {
        for i in (0..n).rev() {
            let r = WRAP_BLOCK_SIZE * i;
            b[WRAP_BLOCK_SIZE..].copy_from_slice(&out[r..r + WRAP_BLOCK_SIZE]);
            for (a, s) in b[..WRAP_BLOCK_SIZE].iter_mut().zip(t.to_be_bytes()) {
                *a ^= s;
            }
            t -= 1;
            key.decrypt_block(&mut b)?;
            out[r..r + WRAP_BLOCK_SIZE].copy_from_slice(&b[WRAP_BLOCK_SIZE..]);
        }
    }

    let expected = iv.unwrap_or(&DEFAULT_IV);
    if b[..WRAP_BLOCK_SIZE].ct_eq(expected).unwrap_u8() != 1 {
        return Err(CryptoError::KeyWrapIntegrityFail);
    }
    Ok(())
}
