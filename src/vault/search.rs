//! Substring search over a record set.
//!
//! Matching is case-insensitive and unanchored: a field matches when it
//! contains the query anywhere, after both are lowercased.  An empty
//! query matches nothing.

use crate::records::{Credential, Note, RecordSet, SearchResult};

/// Copy out every record with a field containing `query`.
pub fn search(records: &RecordSet, query: &str) -> SearchResult {
    if query.is_empty() {
        return SearchResult::default();
    }
    let needle = query.to_lowercase();

    SearchResult {
        passwords: records
            .passwords
            .iter()
            .filter(|c| credential_matches(c, &needle))
            .cloned()
            .collect(),
        notes: records
            .notes
            .iter()
            .filter(|n| note_matches(n, &needle))
            .cloned()
            .collect(),
    }
}

/// Name, username or note. The URL and the secret are not searched.
fn credential_matches(credential: &Credential, needle: &str) -> bool {
    contains(&credential.name, needle)
        || contains(&credential.username, needle)
        || contains(&credential.note, needle)
}

fn note_matches(note: &Note, needle: &str) -> bool {
    contains(&note.title, needle) || contains(&note.content, needle)
}

/// `needle` must already be lowercase.
fn contains(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}
