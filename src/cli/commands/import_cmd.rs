//! `pinvault import` — append records from an exported JSON file.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{PinVaultError, Result};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str) -> Result<()> {
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(PinVaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let document = fs::read(source)?;
    let vault = unlock(cli)?;

    let (passwords_before, notes_before) = (vault.password_count(), vault.note_count());
    vault.import(&document)?;

    output::success(&format!(
        "Imported {} password(s) and {} note(s) from {}",
        vault.password_count() - passwords_before,
        vault.note_count() - notes_before,
        source.display()
    ));
    output::tip("Imported records are appended; duplicates are not merged.");

    Ok(())
}
