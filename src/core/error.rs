//! Error types for the islegen library

use thiserror::Error;

/// Main error type for the library.
///
/// Only the configuration boundary is fallible; the generation and
/// placement hot paths report invalidity through sentinels and silent
/// skips instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
