//! GCM (Galois/Counter Mode) authenticated encryption.
//!
//! Implements GCM as defined in NIST SP 800-38D on top of the
//! [`BlockCipher`](crate::provider::BlockCipher) trait, with the table-less
//! GHASH from the [`gf128`](crate::gf128) helper. Both directions operate
//! on the text buffer in place, and GHASH always runs over ciphertext: on
//! decryption each chunk is folded into the accumulator before the
//! keystream is applied.

use crate::aes::{AesKey, AES_BLOCK_SIZE};
use crate::gf128::{self, Block, NativeWord};
use crate::provider::BlockCipher;
use subtle::ConstantTimeEq;
use symcipher_types::CryptoError;

/// Maximum (and internal) GCM tag size in bytes.
pub const GCM_TAG_SIZE: usize = 16;

/// The nominal IV size; other IV lengths route through GHASH to derive J0.
pub const GCM_IV_SIZE: usize = 12;

/// Increment the last 4 bytes of a counter block (big-endian INC32).
/// Wraparound stays confined to the 32-bit counter field.
fn inc32(counter: &mut Block) {
    let ctr =
        u32::from_be_bytes([counter[12], counter[13], counter[14], counter[15]]).wrapping_add(1);
    counter[12..16].copy_from_slice(&ctr.to_be_bytes());
}

/// Fold one chunk (zero-padded to a block) into the GHASH accumulator.
fn ghash_fold(state: &mut Block, h: &Block, chunk: &[u8]) {
    let mut block = Block::default();
    block[..chunk.len()].copy_from_slice(chunk);
    gf128::xor_block::<NativeWord>(state, &block);
    gf128::mul::<NativeWord>(state, h);
}

/// GHASH over variable-length data in 16-byte chunks.
fn ghash_data(state: &mut Block, h: &Block, data: &[u8]) {
    for chunk in data.chunks(AES_BLOCK_SIZE) {
        ghash_fold(state, h, chunk);
    }
}

/// Derive the initial counter block J0 from an IV of any nonzero length.
///
/// A 96-bit IV is used directly with the counter field seeded to 1; any
/// other length is hashed: GHASH over the zero-padded IV, then one block
/// carrying the IV bit length.
fn derive_j0(h: &Block, iv: &[u8]) -> Block {
    let mut j0 = Block::default();
    if iv.len() == GCM_IV_SIZE {
        j0[..GCM_IV_SIZE].copy_from_slice(iv);
        j0[15] = 1;
    } else {
        ghash_data(&mut j0, h, iv);
        let mut len_block = Block::default();
        len_block[8..].copy_from_slice(&(iv.len() as u64 * 8).to_be_bytes());
        ghash_fold(&mut j0, h, &len_block);
    }
    j0
}

/// Shared encrypt/decrypt pass; returns the full 16-byte tag.
fn gcm_crypt(
    cipher: &dyn BlockCipher,
    iv: &[u8],
    aad: &[u8],
    data: &mut [u8],
    encrypting: bool,
) -> Result<Block, CryptoError> {
    if iv.is_empty() {
        return Err(CryptoError::InvalidIvLength);
    }

    // Hash subkey H = Encrypt(0^128)
    let mut h = Block::default();
    cipher.encrypt_block(&mut h)?;

    let j0 = derive_j0(&h, iv);

    // EJ0 is reserved for tag finalization.
    let mut ej0 = j0;
    cipher.encrypt_block(&mut ej0)?;

    let mut state = Block::default();
    ghash_data(&mut state, &h, aad);

    let mut counter = j0;
    for chunk in data.chunks_mut(AES_BLOCK_SIZE) {
        inc32(&mut counter);
        let mut keystream = counter;
        cipher.encrypt_block(&mut keystream)?;

        // GHASH authenticates ciphertext: after the XOR when encrypting,
        // before it when decrypting.
        if encrypting {
            for (d, &k) in chunk.iter_mut().zip(keystream.iter()) {
                *d ^= k;
            }
            ghash_fold(&mut state, &h, chunk);
        } else {
            ghash_fold(&mut state, &h, chunk);
            for (d, &k) in chunk.iter_mut().zip(keystream.iter()) {
                *d ^= k;
            }
        }
    }

    // Length block: [len(AAD) in bits || len(C) in bits]
    let mut len_block = Block::default();
    len_block[..8].copy_from_slice(&(aad.len() as u64 * 8).to_be_bytes());
    len_block[8..].copy_from_slice(&(data.len() as u64 * 8).to_be_bytes());
    ghash_fold(&mut state, &h, &len_block);

    gf128::xor_block::<NativeWord>(&mut state, &ej0);
    Ok(state)
}

/// Encrypt a buffer in place with AES-GCM and produce an authentication tag.
///
/// `tag` receives the most-significant `tag.len()` bytes of the full
/// 16-byte tag; lengths from 0 to 16 are accepted. The IV may have any
/// nonzero length, 12 bytes being the nominal fast path.
pub fn gcm_encrypt(
    key: &AesKey,
    iv: &[u8],
    aad: &[u8],
    data: &mut [u8],
    tag: &mut [u8],
) -> Result<(), CryptoError> {
    if tag.len() > GCM_TAG_SIZE {
        return Err(CryptoError::InvalidTagLength);
    }
    let full = gcm_crypt(key, iv, aad, data, true)?;
    tag.copy_from_slice(&full[..tag.len()]);
    Ok(())
}

/// Decrypt a buffer in place with AES-GCM and verify its tag.
///
/// Runs the identical computation as encryption and compares the computed
/// tag against `tag` in constant time over its full length; an empty tag
/// means no authentication is performed. On `AeadTagVerifyFail` the
/// buffer has already been decrypted and must be treated as untrusted.
pub fn gcm_decrypt(
    key: &AesKey,
    iv: &[u8],
    aad: &[u8],
    data: &mut [u8],
    tag: &[u8],
) -> Result<(), CryptoError> {
    if tag.len() > GCM_TAG_SIZE {
        return Err(CryptoError::InvalidTagLength);
    }
    let full = gcm_crypt(key, iv, aad, data, false)?;
    if full[..tag.len()].ct_eq(tag).unwrap_u8() != 1 {
        return Err(CryptoError::AeadTagVerifyFail);
    }
    Ok(())
}
