//! Errors surfaced by configuration and command handling.
//!
//! Nothing here is fatal to a running simulation: the engine downgrades
//! these to warnings and keeps stepping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown constants preset: {0}")]
    UnknownPreset(String),

    #[error("unknown guidance constant: {0}")]
    UnknownConstant(String),

    #[error("invalid configuration document: {0}")]
    InvalidDocument(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
