#![forbid(unsafe_code)]
#![doc = "Common types and error codes for the symcipher engine."]

pub mod error;

pub use error::*;
