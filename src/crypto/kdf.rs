//! PIN-based key derivation.
//!
//! Two things are derived from a PIN:
//! - the **verifier**, a hex SHA-256 of the PIN persisted by the
//!   authenticator so a login can be checked without touching the vault;
//! - the **vault key**, a 32-byte AES-256 key.
//!
//! The key derivation is described by a persisted [`KdfProfile`].  The
//! default `sha256` profile hashes the PIN with a fixed domain prefix;
//! the `argon2id` profile runs Argon2id over the PIN with a random salt
//! stored in the profile.  Either way the key is a pure function of the
//! PIN and the profile, so re-opening the vault only needs both again.

use std::path::Path;

use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::errors::{PinVaultError, Result};
use crate::persist;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Length of the Argon2id salt in bytes.
const SALT_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Domain prefix that keeps the vault key distinct from the verifier.
const KEY_DOMAIN: &[u8] = b"pinvault-key-v1:";

/// A 32-byte vault key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(..)")
    }
}

/// Hex-encoded SHA-256 of the PIN, as stored in the verifier file.
pub fn pin_verifier(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

/// Derive the vault key from a PIN with the default `sha256` profile.
///
/// Deterministic and unsalted: the same PIN always yields the same key.
pub fn derive_key(pin: &str) -> VaultKey {
    let mut hasher = Sha256::new();
    hasher.update(KEY_DOMAIN);
    hasher.update(pin.as_bytes());
    let mut digest: [u8; KEY_LEN] = hasher.finalize().into();
    let key = VaultKey::new(digest);
    digest.zeroize();
    key
}

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Which derivation a new profile should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfAlgorithm {
    #[default]
    Sha256,
    Argon2id,
}

/// Persisted key derivation parameters for one vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum KdfProfile {
    /// Domain-separated SHA-256 of the PIN.
    Sha256,
    /// Argon2id over the PIN with a per-vault random salt.
    Argon2id {
        #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
        salt: Vec<u8>,
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl KdfProfile {
    /// Build a fresh profile; `argon2id` draws a new random salt.
    pub fn generate(algorithm: KdfAlgorithm, params: &Argon2Params) -> Self {
        match algorithm {
            KdfAlgorithm::Sha256 => Self::Sha256,
            KdfAlgorithm::Argon2id => {
                let mut salt = vec![0u8; SALT_LEN];
                rand::rng().fill_bytes(&mut salt);
                Self::Argon2id {
                    salt,
                    memory_kib: params.memory_kib,
                    iterations: params.iterations,
                    parallelism: params.parallelism,
                }
            }
        }
    }

    /// Read the profile at `path`, or create and persist a new one.
    ///
    /// An existing profile always wins over the requested algorithm so a
    /// config change can never silently re-key an existing vault.
    pub fn load_or_init(
        path: &Path,
        algorithm: KdfAlgorithm,
        params: &Argon2Params,
    ) -> Result<Self> {
        if let Some(profile) = Self::read(path)? {
            return Ok(profile);
        }

        let profile = Self::generate(algorithm, params);
        let json = serde_json::to_vec_pretty(&profile)
            .map_err(|e| PinVaultError::SerializationError(format!("KDF profile: {e}")))?;
        persist::write_atomic(path, &json)?;
        info!(path = %path.display(), algorithm = profile.name(), "created KDF profile");
        Ok(profile)
    }

    /// Read the profile at `path` without ever creating one.
    ///
    /// Returns `None` if the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let Some(bytes) = persist::read_optional(path)? else {
            return Ok(None);
        };
        let profile: KdfProfile = serde_json::from_slice(&bytes).map_err(|e| {
            PinVaultError::Malformed(format!("KDF profile {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), algorithm = profile.name(), "loaded KDF profile");
        Ok(Some(profile))
    }

    /// Short algorithm name, for logs and display.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Argon2id { .. } => "argon2id",
        }
    }

    /// Derive the vault key for `pin` under this profile.
    pub fn derive(&self, pin: &str) -> Result<VaultKey> {
        match self {
            Self::Sha256 => Ok(derive_key(pin)),
            Self::Argon2id {
                salt,
                memory_kib,
                iterations,
                parallelism,
            } => {
                let params = Argon2Params {
                    memory_kib: *memory_kib,
                    iterations: *iterations,
                    parallelism: *parallelism,
                };
                let mut bytes = derive_argon2id(pin.as_bytes(), salt, &params)?;
                let key = VaultKey::new(bytes);
                bytes.zeroize();
                Ok(key)
            }
        }
    }
}

/// Run Argon2id with explicit parameters.
///
/// Enforces minimum parameters to prevent dangerously weak settings.
fn derive_argon2id(pin: &[u8], salt: &[u8], argon2_params: &Argon2Params) -> Result<[u8; KEY_LEN]> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(PinVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(PinVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(PinVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PinVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(pin, salt, &mut key)
        .map_err(|e| PinVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fast_params() -> Argon2Params {
        Argon2Params {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn verifier_is_hex_sha256() {
        // SHA-256("1234")
        assert_eq!(
            pin_verifier("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn key_differs_from_verifier_bytes() {
        let key = derive_key("1234");
        assert_ne!(hex::encode(key.as_bytes()), pin_verifier("1234"));
    }

    #[test]
    fn profile_json_uses_algorithm_tag() {
        let json = serde_json::to_string(&KdfProfile::Sha256).unwrap();
        assert_eq!(json, r#"{"algorithm":"sha256"}"#);

        let profile = KdfProfile::generate(KdfAlgorithm::Argon2id, &fast_params());
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""algorithm":"argon2id""#));
        let parsed: KdfProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn load_or_init_keeps_existing_profile() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kdf.json");

        let first = KdfProfile::load_or_init(&path, KdfAlgorithm::Argon2id, &fast_params()).unwrap();
        // Asking for sha256 later must not replace the stored argon2id profile.
        let second = KdfProfile::load_or_init(&path, KdfAlgorithm::Sha256, &fast_params()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.name(), "argon2id");
    }

    #[test]
    fn read_missing_profile_is_none_and_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kdf.json");

        assert!(KdfProfile::read(&path).unwrap().is_none());
        assert!(!path.exists());

        let created = KdfProfile::load_or_init(&path, KdfAlgorithm::Sha256, &fast_params()).unwrap();
        assert_eq!(KdfProfile::read(&path).unwrap(), Some(created));
    }

    #[test]
    fn load_or_init_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kdf.json");
        std::fs::write(&path, "not json").unwrap();

        let err = KdfProfile::load_or_init(&path, KdfAlgorithm::Sha256, &fast_params()).unwrap_err();
        assert!(matches!(err, PinVaultError::Malformed(_)));
    }

    #[test]
    fn argon2id_rejects_weak_memory() {
        let profile = KdfProfile::Argon2id {
            salt: vec![0u8; SALT_LEN],
            memory_kib: 1_024,
            iterations: 1,
            parallelism: 1,
        };
        assert!(matches!(
            profile.derive("1234"),
            Err(PinVaultError::KeyDerivationFailed(_))
        ));
    }
}
