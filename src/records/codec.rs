//! JSON encoding of a [`RecordSet`].
//!
//! The same document shape is used inside the encrypted data file and
//! for plaintext export/import:
//!
//! ```text
//! {"passwords":[{"id":..,"name":..,..}],"notes":[{"id":..,"title":..,..}]}
//! ```
//!
//! Timestamps are RFC 3339 strings, which round-trip exactly.

use super::model::RecordSet;
use crate::errors::{PinVaultError, Result};

/// Compact encoding, used for the encrypted payload.
pub fn encode(records: &RecordSet) -> Result<Vec<u8>> {
    serde_json::to_vec(records)
        .map_err(|e| PinVaultError::SerializationError(format!("record set: {e}")))
}

/// Indented encoding, used for human-readable exports.
pub fn encode_pretty(records: &RecordSet) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(records)
        .map_err(|e| PinVaultError::SerializationError(format!("record set: {e}")))
}

/// Parse a record set document; any parse failure is `Malformed`.
pub fn decode(bytes: &[u8]) -> Result<RecordSet> {
    serde_json::from_slice(bytes)
        .map_err(|e| PinVaultError::Malformed(format!("record set JSON: {e}")))
}
