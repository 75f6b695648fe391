use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Argon2Params, KdfAlgorithm};
use crate::errors::{PinVaultError, Result};

/// Per-user configuration, loaded from `<base dir>/config.toml`.
///
/// Every field has a sensible default so PinVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the encrypted data file.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// File name of the PIN verifier.
    #[serde(default = "default_verifier_file")]
    pub verifier_file: String,

    /// File name of the persisted KDF profile.
    #[serde(default = "default_kdf_file")]
    pub kdf_file: String,

    /// Key derivation for a vault created from now on (`sha256` or `argon2id`).
    /// An existing KDF profile is never replaced.
    #[serde(default)]
    pub kdf: KdfAlgorithm,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_file() -> String {
    "data.enc".to_string()
}

fn default_verifier_file() -> String {
    "pin.hash".to_string()
}

fn default_kdf_file() -> String {
    "kdf.json".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            verifier_file: default_verifier_file(),
            kdf_file: default_kdf_file(),
            kdf: KdfAlgorithm::default(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the base directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<base_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PinVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Example: `base_dir/data.enc`
    pub fn data_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.data_file)
    }

    /// Example: `base_dir/pin.hash`
    pub fn verifier_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.verifier_file)
    }

    /// Example: `base_dir/kdf.json`
    pub fn kdf_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.kdf_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
