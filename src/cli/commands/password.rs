//! `pinvault password` — add, list, show, update and delete passwords.

use crate::cli::output;
use crate::cli::{confirm, read_value, resolve_id, unlock, Cli, PasswordAction};
use crate::errors::{PinVaultError, RecordKind, Result};
use crate::records::Credential;
use crate::vault::Vault;

/// Execute a `password` subcommand.
pub fn execute(cli: &Cli, action: &PasswordAction) -> Result<()> {
    match action {
        PasswordAction::Add {
            name,
            url,
            username,
            note,
        } => add(cli, name, url, username, note),
        PasswordAction::List => list(cli),
        PasswordAction::Show { id } => show(cli, id),
        PasswordAction::Update {
            id,
            name,
            url,
            username,
            note,
            secret,
        } => update(
            cli,
            id,
            Changes {
                name: name.as_deref(),
                url: url.as_deref(),
                username: username.as_deref(),
                note: note.as_deref(),
                replace_secret: *secret,
            },
        ),
        PasswordAction::Delete { id, force } => delete(cli, id, *force),
    }
}

fn add(cli: &Cli, name: &str, url: &str, username: &str, note: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PinVaultError::CommandFailed("name cannot be empty".into()));
    }

    let vault = unlock(cli)?;
    let secret = read_value(&format!("Password for {name}"), true)?;

    let credential = Credential::new(name, url, username, secret, note);
    let id = credential.id.clone();
    vault.add_password(credential)?;

    output::success(&format!(
        "Password '{name}' added ({} total)",
        vault.password_count()
    ));
    output::tip(&format!(
        "Run `pinvault password show {}` to view it.",
        output::short_id(&id)
    ));
    Ok(())
}

fn list(cli: &Cli) -> Result<()> {
    let vault = unlock(cli)?;
    let passwords = vault.passwords();

    output::info(&format!("{} password(s)", passwords.len()));
    output::print_passwords_table(&passwords);
    Ok(())
}

fn show(cli: &Cli, wanted: &str) -> Result<()> {
    let vault = unlock(cli)?;
    let credential = lookup(&vault, wanted)?;
    output::print_credential(&credential);
    Ok(())
}

/// Fields to change; `None` keeps the stored value.
struct Changes<'a> {
    name: Option<&'a str>,
    url: Option<&'a str>,
    username: Option<&'a str>,
    note: Option<&'a str>,
    replace_secret: bool,
}

fn update(cli: &Cli, wanted: &str, changes: Changes<'_>) -> Result<()> {
    let vault = unlock(cli)?;
    let mut credential = lookup(&vault, wanted)?;

    if let Some(name) = changes.name {
        credential.name = name.to_string();
    }
    if let Some(url) = changes.url {
        credential.url = url.to_string();
    }
    if let Some(username) = changes.username {
        credential.username = username.to_string();
    }
    if let Some(note) = changes.note {
        credential.note = note.to_string();
    }
    if changes.replace_secret {
        credential.password = read_value(&format!("New password for {}", credential.name), true)?;
    }

    let name = credential.name.clone();
    vault.update_password(credential)?;
    output::success(&format!("Password '{name}' updated"));
    Ok(())
}

fn delete(cli: &Cli, wanted: &str, force: bool) -> Result<()> {
    let vault = unlock(cli)?;
    let credential = lookup(&vault, wanted)?;

    if !confirm(&format!("Delete password '{}'?", credential.name), force)? {
        output::info("Cancelled.");
        return Ok(());
    }

    vault.delete_password(&credential.id)?;
    output::success(&format!("Deleted password '{}'", credential.name));
    Ok(())
}

/// Find a credential by full id or unique id prefix.
fn lookup(vault: &Vault, wanted: &str) -> Result<Credential> {
    let passwords = vault.passwords();
    let id = resolve_id(passwords.iter().map(|c| c.id.as_str()), wanted)?;
    passwords
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(PinVaultError::NotFound {
            kind: RecordKind::Password,
            id,
        })
}
