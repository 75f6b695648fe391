//! `pinvault search` — find passwords and notes containing some text.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let vault = unlock(cli)?;
    let result = vault.search(query);

    if result.is_empty() {
        output::info(&format!("Nothing matches '{query}'."));
        return Ok(());
    }

    output::info(&format!("{} match(es) for '{query}'", result.len()));
    if !result.passwords.is_empty() {
        output::print_passwords_table(&result.passwords);
    }
    if !result.notes.is_empty() {
        output::print_notes_table(&result.notes);
    }
    Ok(())
}
