//! Configuration: per-user settings file and directory resolution.

pub mod paths;
pub mod settings;

pub use settings::Settings;
