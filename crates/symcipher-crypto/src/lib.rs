#![forbid(unsafe_code)]
#![doc = "Portable AES block cipher and modes of operation for the symcipher engine."]

// Core traits
pub mod provider;

// Block cipher
#[cfg(feature = "aes")]
pub mod aes;

// Shared GF(2^128) arithmetic (GHASH multiply, doubling shifts)
#[cfg(any(feature = "cmac", feature = "modes"))]
pub(crate) mod gf128;

// MAC algorithms
#[cfg(feature = "cmac")]
pub mod cmac;

// Modes of operation
#[cfg(feature = "modes")]
pub mod modes;
