//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::records::{Credential, Note};

/// Characters of a record id shown in tables.
const SHORT_ID_LEN: usize = 8;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (ID, Name, Username, URL, Updated).
/// Secrets are never printed here.
pub fn print_passwords_table(passwords: &[Credential]) {
    if passwords.is_empty() {
        info("No passwords stored yet.");
        tip("Run `pinvault password add --name <NAME>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Username", "URL", "Updated"]);

    for c in passwords {
        table.add_row(vec![
            short_id(&c.id).to_string(),
            c.name.clone(),
            c.username.clone(),
            c.url.clone(),
            c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of notes (ID, Title, Updated).
pub fn print_notes_table(notes: &[Note]) {
    if notes.is_empty() {
        info("No notes stored yet.");
        tip("Run `pinvault note add --title <TITLE>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Updated"]);

    for n in notes {
        table.add_row(vec![
            short_id(&n.id).to_string(),
            n.title.clone(),
            n.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one credential, secret included.
pub fn print_credential(c: &Credential) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID", c.id.as_str()]);
    table.add_row(vec!["Name", c.name.as_str()]);
    table.add_row(vec!["URL", c.url.as_str()]);
    table.add_row(vec!["Username", c.username.as_str()]);
    table.add_row(vec!["Password", c.password.as_str()]);
    table.add_row(vec!["Note", c.note.as_str()]);
    table.add_row(vec![
        "Created".to_string(),
        c.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec![
        "Updated".to_string(),
        c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    println!("{table}");
}

/// Print a note's title, metadata and body.
pub fn print_note(n: &Note) {
    println!("{}", style(&n.title).bold());
    println!(
        "{}",
        style(format!(
            "{}  created {}  updated {}",
            n.id,
            n.created_at.format("%Y-%m-%d %H:%M:%S"),
            n.updated_at.format("%Y-%m-%d %H:%M:%S")
        ))
        .dim()
    );
    println!();
    println!("{}", n.content);
}

/// First characters of a record id, enough to pick it out in a list.
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_uuids() {
        assert_eq!(short_id("0f1e2d3c-aaaa-4bbb-8ccc-111111111111"), "0f1e2d3c");
    }

    #[test]
    fn short_id_keeps_short_ids() {
        assert_eq!(short_id("abc"), "abc");
    }
}
