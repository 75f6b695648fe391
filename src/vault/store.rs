//! The vault: an in-memory record set mirrored to one encrypted file.
//!
//! `Vault` holds the decrypted `RecordSet` behind a single reader/writer
//! lock.  Reads (`passwords`, `notes`, `search`, `export`) share the lock;
//! every mutation holds it exclusively until its disk write has finished,
//! so readers never see a half-applied change and two writers never
//! interleave their persistence.
//!
//! Every mutation is applied in memory, persisted, and undone again if
//! persisting fails, which keeps memory and disk in step.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::crypto::{self, KdfProfile, VaultKey};
use crate::errors::{PinVaultError, RecordKind, Result};
use crate::persist;
use crate::records::{codec, Credential, Note, RecordSet, SearchResult};

use super::search;

/// The main vault handle.  Build one with `Vault::new` or
/// `Vault::with_profile`, call `load` once, then use its methods.
pub struct Vault {
    /// Path to the encrypted data file.
    path: PathBuf,

    /// Key derived from the PIN (zeroized on drop).
    key: VaultKey,

    /// The decrypted working set.
    records: RwLock<RecordSet>,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// A vault for `path` keyed by the default PIN derivation.
    ///
    /// Nothing is read from disk until `load` is called.
    pub fn new(path: impl Into<PathBuf>, pin: &str) -> Self {
        Self::with_key(path, crypto::derive_key(pin))
    }

    /// A vault whose key comes from a persisted KDF profile.
    pub fn with_profile(path: impl Into<PathBuf>, pin: &str, profile: &KdfProfile) -> Result<Self> {
        Ok(Self::with_key(path, profile.derive(pin)?))
    }

    /// A vault around an already derived key.
    pub fn with_key(path: impl Into<PathBuf>, key: VaultKey) -> Self {
        Self {
            path: path.into(),
            key,
            records: RwLock::new(RecordSet::default()),
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Decrypt the data file into memory.
    ///
    /// A missing file is a first run and leaves the record set as it is.
    /// On any read, decryption or parse failure the in-memory records are
    /// left untouched.
    pub fn load(&self) -> Result<()> {
        let mut records = self.records.write();

        let Some(envelope) = persist::read_optional(&self.path)? else {
            debug!(path = %self.path.display(), "no data file yet");
            return Ok(());
        };

        let plaintext = crypto::open(&self.key, &envelope)?;
        let loaded = codec::decode(&plaintext)?;

        debug!(
            path = %self.path.display(),
            passwords = loaded.passwords.len(),
            notes = loaded.notes.len(),
            "loaded vault"
        );
        *records = loaded;
        Ok(())
    }

    /// Encrypt the current record set and write it atomically.
    pub fn save(&self) -> Result<()> {
        let records = self.records.write();
        self.persist(&records)
    }

    fn persist(&self, records: &RecordSet) -> Result<()> {
        let plaintext = codec::encode(records)?;
        let envelope = crypto::seal(&self.key, &plaintext)?;
        persist::write_atomic(&self.path, &envelope)?;
        debug!(path = %self.path.display(), bytes = envelope.len(), "saved vault");
        Ok(())
    }

    /// Persist `records`, running `undo` on them if that fails.
    fn commit(
        &self,
        records: &mut RecordSet,
        operation: &str,
        undo: impl FnOnce(&mut RecordSet),
    ) -> Result<()> {
        if let Err(e) = self.persist(records) {
            undo(records);
            warn!(operation, error = %e, "save failed, rolled back in-memory change");
            return Err(e);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Password operations
    // ------------------------------------------------------------------

    /// Append a credential and persist.
    pub fn add_password(&self, credential: Credential) -> Result<()> {
        let mut records = self.records.write();
        debug!(id = %credential.id, "adding password");
        records.passwords.push(credential);
        self.commit(&mut records, "add_password", |r| {
            r.passwords.pop();
        })
    }

    /// Replace the credential with the same id, keeping its position and
    /// creation time, and persist.
    pub fn update_password(&self, credential: Credential) -> Result<()> {
        let mut records = self.records.write();
        let index = position(&records.passwords, |c| c.id == credential.id)
            .ok_or_else(|| not_found(RecordKind::Password, &credential.id))?;

        let mut updated = credential;
        updated.created_at = records.passwords[index].created_at;
        updated.touch();

        debug!(id = %updated.id, "updating password");
        let previous = std::mem::replace(&mut records.passwords[index], updated);
        self.commit(&mut records, "update_password", |r| {
            r.passwords[index] = previous;
        })
    }

    /// Remove the credential with `id` and persist.
    pub fn delete_password(&self, id: &str) -> Result<()> {
        let mut records = self.records.write();
        let index = position(&records.passwords, |c| c.id == id)
            .ok_or_else(|| not_found(RecordKind::Password, id))?;

        debug!(id, "deleting password");
        let removed = records.passwords.remove(index);
        self.commit(&mut records, "delete_password", |r| {
            r.passwords.insert(index, removed);
        })
    }

    /// A copy of every credential, in insertion order.
    pub fn passwords(&self) -> Vec<Credential> {
        self.records.read().passwords.clone()
    }

    /// A copy of the credential with `id`, if any.
    pub fn find_password(&self, id: &str) -> Option<Credential> {
        self.records
            .read()
            .passwords
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn password_count(&self) -> usize {
        self.records.read().passwords.len()
    }

    // ------------------------------------------------------------------
    // Note operations
    // ------------------------------------------------------------------

    /// Append a note and persist.
    pub fn add_note(&self, note: Note) -> Result<()> {
        let mut records = self.records.write();
        debug!(id = %note.id, "adding note");
        records.notes.push(note);
        self.commit(&mut records, "add_note", |r| {
            r.notes.pop();
        })
    }

    /// Replace the note with the same id, keeping its position and
    /// creation time, and persist.
    pub fn update_note(&self, note: Note) -> Result<()> {
        let mut records = self.records.write();
        let index = position(&records.notes, |n| n.id == note.id)
            .ok_or_else(|| not_found(RecordKind::Note, &note.id))?;

        let mut updated = note;
        updated.created_at = records.notes[index].created_at;
        updated.touch();

        debug!(id = %updated.id, "updating note");
        let previous = std::mem::replace(&mut records.notes[index], updated);
        self.commit(&mut records, "update_note", |r| {
            r.notes[index] = previous;
        })
    }

    /// Remove the note with `id` and persist.
    pub fn delete_note(&self, id: &str) -> Result<()> {
        let mut records = self.records.write();
        let index = position(&records.notes, |n| n.id == id)
            .ok_or_else(|| not_found(RecordKind::Note, id))?;

        debug!(id, "deleting note");
        let removed = records.notes.remove(index);
        self.commit(&mut records, "delete_note", |r| {
            r.notes.insert(index, removed);
        })
    }

    /// A copy of every note, in insertion order.
    pub fn notes(&self) -> Vec<Note> {
        self.records.read().notes.clone()
    }

    pub fn find_note(&self, id: &str) -> Option<Note> {
        self.records.read().notes.iter().find(|n| n.id == id).cloned()
    }

    pub fn note_count(&self) -> usize {
        self.records.read().notes.len()
    }

    // ------------------------------------------------------------------
    // Search, export, import
    // ------------------------------------------------------------------

    /// Case-insensitive substring search; see [`search::search`].
    pub fn search(&self, query: &str) -> SearchResult {
        search::search(&self.records.read(), query)
    }

    /// The record set as plaintext JSON, for the caller to write out.
    pub fn export(&self) -> Result<Vec<u8>> {
        codec::encode_pretty(&self.records.read())
    }

    /// Append every record from an exported document and persist.
    ///
    /// Records are not deduplicated: importing the same document twice
    /// yields two copies of each record.
    pub fn import(&self, document: &[u8]) -> Result<()> {
        let imported = codec::decode(document)?;

        let mut records = self.records.write();
        let (password_len, note_len) = (records.passwords.len(), records.notes.len());

        info!(
            passwords = imported.passwords.len(),
            notes = imported.notes.len(),
            "importing records"
        );
        records.passwords.extend(imported.passwords);
        records.notes.extend(imported.notes);

        self.commit(&mut records, "import", |r| {
            r.passwords.truncate(password_len);
            r.notes.truncate(note_len);
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn position<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> Option<usize> {
    items.iter().position(predicate)
}

fn not_found(kind: RecordKind, id: &str) -> PinVaultError {
    PinVaultError::NotFound {
        kind,
        id: id.to_string(),
    }
}
