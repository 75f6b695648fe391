//! Credential and note records, and the record set that holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored login: where it is used, who logs in, and the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque identifier, assigned once at creation.
    pub id: String,
    pub name: String,
    pub url: String,
    pub username: String,
    /// The secret value itself.
    pub password: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// A new credential with a fresh identifier and both timestamps set to now.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: name.into(),
            url: url.into(),
            username: username.into(),
            password: password.into(),
            note: note.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Everything a vault holds.  Order within each list is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub passwords: Vec<Credential>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty() && self.notes.is_empty()
    }
}

/// Records matching a search, copied out of the vault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub passwords: Vec<Credential>,
    pub notes: Vec<Note>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty() && self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.passwords.len() + self.notes.len()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_get_distinct_ids_and_equal_timestamps() {
        let a = Credential::new("GitHub", "https://github.com", "alice", "pw", "");
        let b = Credential::new("GitHub", "https://github.com", "alice", "pw", "");
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);

        let n = Note::new("Shopping List", "milk");
        assert_eq!(n.created_at, n.updated_at);
        assert!(Uuid::parse_str(&n.id).is_ok());
    }

    #[test]
    fn touch_moves_only_updated_at() {
        let mut note = Note::new("t", "c");
        let created = note.created_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        note.touch();
        assert_eq!(note.created_at, created);
        assert!(note.updated_at > created);
    }
}
