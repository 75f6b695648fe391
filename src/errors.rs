use thiserror::Error;

/// All errors that can occur in PinVault.
#[derive(Debug, Error)]
pub enum PinVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong PIN or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Malformed data: {0}")]
    Malformed(String),

    // --- PIN errors ---
    #[error("PIN not set — run `pinvault init` first")]
    NotSet,

    #[error("PIN already set — refusing to overwrite the existing verifier")]
    PinAlreadySet,

    #[error("Invalid PIN")]
    InvalidPin,

    // --- Record errors ---
    #[error("{kind} '{id}' not found")]
    NotFound { kind: RecordKind, id: String },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Which collection a missing record was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Password,
    Note,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Password => f.write_str("Password"),
            Self::Note => f.write_str("Note"),
        }
    }
}

/// Convenience type alias for PinVault results.
pub type Result<T> = std::result::Result<T, PinVaultError>;
