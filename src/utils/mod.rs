//! Utility functions and helpers
//!
//! This module contains cryptographic utilities and the encoding helpers used
//! by the genesis types and the application store.

pub mod crypto;
pub mod serialization;

pub use crypto::{
    address_hash, ed25519_public_key, ed25519_sign, ed25519_verify, new_ed25519_key_pair,
    random_bytes, ripemd160_digest, sha256_digest, ADDRESS_LEN,
};

pub use serialization::{deserialize, serialize};
