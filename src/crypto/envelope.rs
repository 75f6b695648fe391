//! AES-256-GCM authenticated encryption of whole payloads.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `open` splits the nonce back out
//! before decrypting.
//!
//! Layout of an envelope:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::kdf::VaultKey;
use crate::errors::{PinVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn seal(key: &VaultKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PinVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // A new nonce from the OS RNG on every call; never derived from state.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PinVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt an envelope produced by `seal`.
///
/// Fails with `Malformed` if the envelope cannot even hold a nonce and
/// with `AuthenticationFailed` if the tag does not verify.
pub fn open(key: &VaultKey, envelope: &[u8]) -> Result<Vec<u8>> {
    if envelope.len() < NONCE_LEN {
        return Err(PinVaultError::Malformed(format!(
            "envelope is {} bytes, shorter than the {NONCE_LEN}-byte nonce",
            envelope.len()
        )));
    }

    let (nonce_bytes, sealed) = envelope.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| PinVaultError::AuthenticationFailed)?;

    cipher
        .decrypt(nonce, sealed)
        .map_err(|_| PinVaultError::AuthenticationFailed)
}
