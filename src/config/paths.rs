//! Path resolution utilities.

use std::path::PathBuf;

use crate::errors::{PinVaultError, Result};

/// Name of the per-user directory holding every PinVault file.
const APP_DIR: &str = "pinvault";

/// Get the default base directory (`<user config dir>/pinvault`).
pub fn default_base_dir() -> Result<PathBuf> {
    let config = dirs::config_dir().ok_or_else(|| {
        PinVaultError::ConfigError("Could not determine the user config directory".to_string())
    })?;
    Ok(config.join(APP_DIR))
}
