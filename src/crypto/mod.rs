//! Cryptographic primitives for PinVault.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening of whole payloads (`envelope`)
//! - PIN verifier and vault key derivation (`kdf`)

pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use envelope::{open, seal, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, pin_verifier, Argon2Params, KdfAlgorithm, KdfProfile, VaultKey};
