//! One module per top-level subcommand.

pub mod completions;
pub mod export;
pub mod import_cmd;
pub mod init;
pub mod note;
pub mod password;
pub mod search;
