//! PIN authentication.
//!
//! `PinAuthenticator` owns the persisted PIN verifier (a hex SHA-256 of
//! the PIN) and remembers the PIN of the last successful `set_pin` or
//! `validate_pin` so the caller can hand it to a `Vault`.  It never holds
//! any vault key material.

use std::io;
use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::pin_verifier;
use crate::errors::{PinVaultError, Result};
use crate::persist;

pub struct PinAuthenticator {
    /// Where the verifier is persisted.
    verifier_path: PathBuf,

    /// The verifier currently in memory, if any.
    pin_hash: Option<String>,

    /// PIN from the last successful set or validation.
    active_pin: Option<Zeroizing<String>>,
}

impl PinAuthenticator {
    /// An authenticator for the verifier file at `verifier_path`.
    ///
    /// Nothing is read until `load_pin_hash` is called.
    pub fn new(verifier_path: impl Into<PathBuf>) -> Self {
        Self {
            verifier_path: verifier_path.into(),
            pin_hash: None,
            active_pin: None,
        }
    }

    /// Store a new PIN: update the in-memory verifier and active PIN, then
    /// persist the verifier.
    ///
    /// The in-memory state is updated even when writing fails, so check
    /// the result before relying on the PIN surviving a restart.
    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        let hash = pin_verifier(pin);
        self.pin_hash = Some(hash.clone());
        self.active_pin = Some(Zeroizing::new(pin.to_string()));

        persist::write_atomic(&self.verifier_path, hash.as_bytes())?;
        info!(path = %self.verifier_path.display(), "PIN verifier written");
        Ok(())
    }

    /// Check `candidate` against the stored verifier in constant time.
    ///
    /// On a match the candidate becomes the active PIN.  Without a stored
    /// verifier nothing matches.
    pub fn validate_pin(&mut self, candidate: &str) -> bool {
        let Some(stored) = self.pin_hash.as_deref() else {
            return false;
        };

        let computed = pin_verifier(candidate);
        let matches: bool = computed.as_bytes().ct_eq(stored.as_bytes()).into();
        if matches {
            self.active_pin = Some(Zeroizing::new(candidate.to_string()));
        }
        debug!(matches, "validated PIN");
        matches
    }

    /// Read the persisted verifier into memory.
    ///
    /// Fails with `NotSet` when no verifier file exists yet; every other
    /// read failure, unreadable bytes included, is an `Io` error.
    pub fn load_pin_hash(&mut self) -> Result<()> {
        let bytes = persist::read_optional(&self.verifier_path)?.ok_or(PinVaultError::NotSet)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        self.pin_hash = Some(text.trim().to_string());
        debug!(path = %self.verifier_path.display(), "loaded PIN verifier");
        Ok(())
    }

    /// True once a verifier has been set or loaded.
    pub fn is_pin_set(&self) -> bool {
        self.pin_hash.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// The PIN recorded by the last successful `set_pin`/`validate_pin`.
    pub fn active_pin(&self) -> Option<&str> {
        self.active_pin.as_ref().map(|p| p.as_str())
    }

    /// Returns the path of the verifier file.
    pub fn verifier_path(&self) -> &Path {
        &self.verifier_path
    }
}
