//! Block cipher modes of operation.
//!
//! This module provides the modes layered on the AES block cipher: ECB,
//! GCM authenticated encryption, and RFC 3394 key wrap. Each mode borrows
//! an initialized [`AesKey`](crate::aes::AesKey) and operates on
//! caller-supplied buffers in place; no mode mutates the key schedule or
//! allocates.

pub mod ecb;
pub mod gcm;
pub mod wrap;
