//! `pinvault note` — add, list, show, update and delete notes.

use crate::cli::output;
use crate::cli::{confirm, read_value, resolve_id, unlock, Cli, NoteAction};
use crate::errors::{PinVaultError, RecordKind, Result};
use crate::records::Note;
use crate::vault::Vault;

/// Execute a `note` subcommand.
pub fn execute(cli: &Cli, action: &NoteAction) -> Result<()> {
    match action {
        NoteAction::Add { title, content } => add(cli, title, content.as_deref()),
        NoteAction::List => list(cli),
        NoteAction::Show { id } => show(cli, id),
        NoteAction::Update { id, title, content } => {
            update(cli, id, title.as_deref(), content.as_deref())
        }
        NoteAction::Delete { id, force } => delete(cli, id, *force),
    }
}

fn add(cli: &Cli, title: &str, content: Option<&str>) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PinVaultError::CommandFailed("title cannot be empty".into()));
    }

    let vault = unlock(cli)?;
    let content = match content {
        Some(c) => c.to_string(),
        None => read_value(&format!("Content of '{title}'"), false)?,
    };

    vault.add_note(Note::new(title, content))?;
    output::success(&format!("Note '{title}' added ({} total)", vault.note_count()));
    Ok(())
}

fn list(cli: &Cli) -> Result<()> {
    let vault = unlock(cli)?;
    let notes = vault.notes();

    output::info(&format!("{} note(s)", notes.len()));
    output::print_notes_table(&notes);
    Ok(())
}

fn show(cli: &Cli, wanted: &str) -> Result<()> {
    let vault = unlock(cli)?;
    output::print_note(&lookup(&vault, wanted)?);
    Ok(())
}

fn update(cli: &Cli, wanted: &str, title: Option<&str>, content: Option<&str>) -> Result<()> {
    if title.is_none() && content.is_none() {
        return Err(PinVaultError::CommandFailed(
            "nothing to update — pass --title and/or --content".into(),
        ));
    }

    let vault = unlock(cli)?;
    let mut note = lookup(&vault, wanted)?;
    if let Some(title) = title {
        note.title = title.to_string();
    }
    if let Some(content) = content {
        note.content = content.to_string();
    }

    let title = note.title.clone();
    vault.update_note(note)?;
    output::success(&format!("Note '{title}' updated"));
    Ok(())
}

fn delete(cli: &Cli, wanted: &str, force: bool) -> Result<()> {
    let vault = unlock(cli)?;
    let note = lookup(&vault, wanted)?;

    if !confirm(&format!("Delete note '{}'?", note.title), force)? {
        output::info("Cancelled.");
        return Ok(());
    }

    vault.delete_note(&note.id)?;
    output::success(&format!("Deleted note '{}'", note.title));
    Ok(())
}

fn lookup(vault: &Vault, wanted: &str) -> Result<Note> {
    let notes = vault.notes();
    let id = resolve_id(notes.iter().map(|n| n.id.as_str()), wanted)?;
    notes
        .into_iter()
        .find(|n| n.id == id)
        .ok_or(PinVaultError::NotFound {
            kind: RecordKind::Note,
            id,
        })
}
