//! `pinvault export` — write every record as plaintext JSON.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::output;
use crate::cli::{base_dir, unlock, Cli};
use crate::config::Settings;
use crate::errors::{PinVaultError, Result};

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<&str>) -> Result<()> {
    let vault = unlock(cli)?;
    let document = vault.export()?;

    match output_path {
        Some(dest) => {
            let dest_path = Path::new(dest);
            refuse_vault_files(cli, dest_path)?;

            fs::write(dest_path, &document).map_err(|e| {
                PinVaultError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!(
                "Exported {} password(s) and {} note(s) to {dest}",
                vault.password_count(),
                vault.note_count()
            ));
            output::warning("The export is NOT encrypted — store it somewhere safe.");
        }
        None => {
            // Write to stdout (no success message, just raw output).
            let mut stdout = io::stdout().lock();
            stdout.write_all(&document)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Never let a plaintext export land on one of the vault's own files.
fn refuse_vault_files(cli: &Cli, dest: &Path) -> Result<()> {
    if dest
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("enc"))
    {
        return Err(PinVaultError::CommandFailed(
            "refusing to export over an .enc file".into(),
        ));
    }

    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;
    let protected = [
        settings.data_path(&base),
        settings.verifier_path(&base),
        settings.kdf_path(&base),
    ];
    if protected.iter().any(|p| p.as_path() == dest) {
        return Err(PinVaultError::CommandFailed(format!(
            "refusing to export over vault file {}",
            dest.display()
        )));
    }
    Ok(())
}
