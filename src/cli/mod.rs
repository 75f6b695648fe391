//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::PinAuthenticator;
use crate::config::{paths, Settings};
use crate::crypto::KdfProfile;
use crate::errors::{PinVaultError, Result};
use crate::vault::Vault;

/// Minimum PIN length to prevent trivially short PINs.
const MIN_PIN_LEN: usize = 4;

/// Environment variable holding the PIN for scripted use.
const PIN_ENV: &str = "PINVAULT_PIN";

/// PinVault CLI: PIN-protected password and note store.
#[derive(Parser)]
#[command(
    name = "pinvault",
    about = "PIN-protected encrypted store for passwords and notes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the vault files (default: <user config dir>/pinvault)
    #[arg(long, env = "PINVAULT_DIR", global = true)]
    pub dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Choose the PIN that protects the vault
    Init,

    /// Manage stored passwords
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Manage notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Search passwords and notes (case-insensitive substring)
    Search {
        /// Text to look for
        query: String,
    },

    /// Export all records as plaintext JSON
    Export {
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import records from an exported JSON file (appended, not merged)
    Import {
        /// Path to the file to import
        file: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Password subcommands.
#[derive(clap::Subcommand)]
pub enum PasswordAction {
    /// Add a password (the secret is read from stdin or prompted)
    Add {
        /// Display name (e.g. GitHub)
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// List all passwords (secrets are not shown)
    List,

    /// Show one password, including its secret
    Show {
        /// Record id or a unique prefix of it
        id: String,
    },

    /// Change fields of a password
    Update {
        /// Record id or a unique prefix of it
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Also replace the secret (read from stdin or prompted)
        #[arg(long)]
        secret: bool,
    },

    /// Delete a password
    Delete {
        /// Record id or a unique prefix of it
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Note subcommands.
#[derive(clap::Subcommand)]
pub enum NoteAction {
    /// Add a note (content is read from stdin or prompted when omitted)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
    },

    /// List all notes
    List,

    /// Show one note
    Show {
        /// Record id or a unique prefix of it
        id: String,
    },

    /// Change the title or content of a note
    Update {
        /// Record id or a unique prefix of it
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Record id or a unique prefix of it
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the directory holding the vault files.
pub fn base_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(dir.clone()),
        None => paths::default_base_dir(),
    }
}

/// Get the PIN, from `PINVAULT_PIN` if set, otherwise by prompting.
///
/// Returns `Zeroizing<String>` so the PIN is wiped from memory on drop.
pub fn prompt_pin() -> Result<Zeroizing<String>> {
    if let Some(pin) = pin_from_env() {
        return Ok(pin);
    }

    let pin = dialoguer::Password::new()
        .with_prompt("Enter PIN")
        .interact()
        .map_err(|e| PinVaultError::CommandFailed(format!("PIN prompt: {e}")))?;
    Ok(Zeroizing::new(pin))
}

/// Prompt for a new PIN with confirmation (used during `init`).
///
/// Also respects `PINVAULT_PIN` for scripted usage and enforces a
/// minimum length.
pub fn prompt_new_pin() -> Result<Zeroizing<String>> {
    if let Some(pin) = pin_from_env() {
        if pin.chars().count() < MIN_PIN_LEN {
            return Err(PinVaultError::CommandFailed(format!(
                "PIN must be at least {MIN_PIN_LEN} characters"
            )));
        }
        return Ok(pin);
    }

    loop {
        let pin = dialoguer::Password::new()
            .with_prompt("Choose PIN")
            .with_confirmation("Confirm PIN", "PINs do not match, try again")
            .interact()
            .map_err(|e| PinVaultError::CommandFailed(format!("PIN prompt: {e}")))?;

        if pin.chars().count() < MIN_PIN_LEN {
            output::warning(&format!(
                "PIN must be at least {MIN_PIN_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(pin));
    }
}

fn pin_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PIN_ENV)
        .ok()
        .filter(|pin| !pin.is_empty())
        .map(Zeroizing::new)
}

/// Authenticate and open the vault, loading any existing data file.
///
/// Loads the verifier, validates the PIN, then builds the vault from the
/// validated PIN and loads it.
pub fn unlock(cli: &Cli) -> Result<Vault> {
    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;

    let mut auth = PinAuthenticator::new(settings.verifier_path(&base));
    auth.load_pin_hash()?;

    let candidate = prompt_pin()?;
    if !auth.validate_pin(&candidate) {
        return Err(PinVaultError::InvalidPin);
    }
    let pin = auth.active_pin().ok_or(PinVaultError::InvalidPin)?;

    let kdf_path = settings.kdf_path(&base);
    let profile = KdfProfile::read(&kdf_path)?.ok_or_else(|| {
        PinVaultError::ConfigError(format!(
            "KDF profile {} is missing; the vault key cannot be derived without it",
            kdf_path.display()
        ))
    })?;
    let vault = Vault::with_profile(settings.data_path(&base), pin, &profile)?;
    vault.load()?;
    Ok(vault)
}

/// Read a value from piped stdin, or prompt for it on a terminal.
///
/// `hidden` input is not echoed.
pub fn read_value(prompt: &str, hidden: bool) -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf.trim_end_matches(['\r', '\n']).to_string());
    }

    let value = if hidden {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
    } else {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    };
    value.map_err(|e| PinVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Ask for confirmation unless `force` is set.
pub fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PinVaultError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Find the id that equals `wanted` or is the only id starting with it.
pub fn resolve_id<'a, I>(ids: I, wanted: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if wanted.is_empty() {
        return Err(PinVaultError::CommandFailed("record id cannot be empty".into()));
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == wanted {
            return Ok(id.to_string());
        }
        if id.starts_with(wanted) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [] => Ok(wanted.to_string()),
        [only] => Ok((*only).to_string()),
        _ => Err(PinVaultError::CommandFailed(format!(
            "id prefix '{wanted}' matches {} records — use more characters",
            matches.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 3] = [
        "0f1e2d3c-aaaa-4bbb-8ccc-111111111111",
        "0f1e9999-aaaa-4bbb-8ccc-222222222222",
        "7a7a7a7a-aaaa-4bbb-8ccc-333333333333",
    ];

    #[test]
    fn resolve_exact_id() {
        assert_eq!(resolve_id(IDS, IDS[1]).unwrap(), IDS[1]);
    }

    #[test]
    fn resolve_unique_prefix() {
        assert_eq!(resolve_id(IDS, "7a7a").unwrap(), IDS[2]);
        assert_eq!(resolve_id(IDS, "0f1e2").unwrap(), IDS[0]);
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        assert!(resolve_id(IDS, "0f1e").is_err());
    }

    #[test]
    fn unknown_id_passes_through() {
        // The vault reports NotFound for it.
        assert_eq!(resolve_id(IDS, "ffff").unwrap(), "ffff");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(resolve_id(IDS, "").is_err());
    }

    #[test]
    fn cli_parses_nested_subcommands() {
        let cli = Cli::parse_from([
            "pinvault", "--dir", "/tmp/pv", "password", "add", "--name", "GitHub",
        ]);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/pv")));
        match cli.command {
            Commands::Password {
                action: PasswordAction::Add { name, url, .. },
            } => {
                assert_eq!(name, "GitHub");
                assert_eq!(url, "");
            }
            _ => panic!("expected password add"),
        }
    }
}
