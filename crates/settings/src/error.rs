//! Settings error types.

use std::path::PathBuf;
use thiserror::Error;

/// Settings errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(String),

    #[error("failed to serialize settings: {0}")]
    Serialize(String),

    /// The settings parsed but do not describe a valid policy.
    #[error(transparent)]
    Policy(#[from] policy::ConfigurationError),
}

pub type Result<T> = std::result::Result<T, Error>;
