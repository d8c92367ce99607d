//! Trait-based provider mechanism for cryptographic algorithms.
//!
//! The `BlockCipher` trait is the seam between the cipher primitive and the
//! modes of operation: a mode borrows an initialized key context and only
//! ever drives single-block transforms through it.

use symcipher_types::CryptoError;

/// A block cipher (e.g., AES).
pub trait BlockCipher: Send + Sync {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Key size in bytes.
    fn key_size(&self) -> usize;

    /// Encrypt a single block in-place.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;

    /// Decrypt a single block in-place.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;
}
