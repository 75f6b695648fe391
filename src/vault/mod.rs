//! Vault module — the encrypted record store.
//!
//! This module provides:
//! - Case-insensitive substring search over records (`search`)
//! - `Vault`, the lock-guarded in-memory record set mirrored to disk (`store`)

pub mod search;
pub mod store;

pub use store::Vault;
