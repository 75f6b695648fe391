//! `pinvault init` — choose the PIN that protects the vault.

use crate::auth::PinAuthenticator;
use crate::cli::output;
use crate::cli::{base_dir, prompt_new_pin, Cli};
use crate::config::Settings;
use crate::crypto::KdfProfile;
use crate::errors::{PinVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;
    let mut auth = PinAuthenticator::new(settings.verifier_path(&base));

    // 1. Refuse to replace an existing PIN: the data file is keyed by it.
    match auth.load_pin_hash() {
        Ok(()) => {
            output::tip("Use `pinvault password list` to open the existing vault.");
            return Err(PinVaultError::PinAlreadySet);
        }
        Err(PinVaultError::NotSet) => {}
        Err(e) => return Err(e),
    }

    let data_path = settings.data_path(&base);
    if data_path.exists() {
        output::warning(&format!(
            "{} already exists — it opens only with the PIN it was created with.",
            data_path.display()
        ));
    }

    // 2. Prompt for a new PIN (with confirmation) and persist its verifier.
    let pin = prompt_new_pin()?;
    auth.set_pin(&pin)?;

    // 3. Fix the key derivation for this vault now so later config
    //    changes cannot alter it.
    let profile = KdfProfile::load_or_init(
        &settings.kdf_path(&base),
        settings.kdf,
        &settings.argon2_params(),
    )?;

    output::success(&format!(
        "PIN set for vault in {} (key derivation: {})",
        base.display(),
        profile.name()
    ));
    output::warning("There is no PIN recovery: forgetting it makes the vault unreadable.");
    output::tip("Run `pinvault password add --name <NAME>` to store a password.");
    output::tip("Run `pinvault note add --title <TITLE>` to store a note.");

    Ok(())
}
