//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// `init` would overwrite an existing settings file.
    #[error("settings file already exists at {path}. Use --force to overwrite")]
    ConfigExists { path: PathBuf },

    /// An error occurred loading, validating or saving settings.
    #[error(transparent)]
    Settings(#[from] settings::Error),

    /// Failed to render JSON output.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
