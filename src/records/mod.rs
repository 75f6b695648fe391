//! Record types and their document encoding.
//!
//! This module provides:
//! - `Credential`, `Note`, `RecordSet` and `SearchResult` (`model`)
//! - JSON encode/decode of a record set (`codec`)

pub mod codec;
pub mod model;

pub use model::{Credential, Note, RecordSet, SearchResult};
