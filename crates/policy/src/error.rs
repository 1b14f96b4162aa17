//! Policy error types.

use std::fmt;
use thiserror::Error;

/// The configuration field a [`ConfigurationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    TargetUrl,
    AllowedDomains,
    BlockedDomains,
}

impl ConfigField {
    /// The field's name as it appears in the settings file.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::TargetUrl => "target.url",
            ConfigField::AllowedDomains => "domainConfig.allowedDomains",
            ConfigField::BlockedDomains => "domainConfig.blockedDomains",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a [`Policy`](crate::Policy).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The target URL could not be parsed as an absolute URL.
    #[error("target.url: '{url}' is not an absolute URL: {reason}")]
    InvalidTargetUrl { url: String, reason: String },

    /// The target URL parsed but carries no hostname (e.g. `mailto:` or `file:///`).
    #[error("target.url: '{url}' has no hostname")]
    MissingHost { url: String },

    /// A domain list contains an empty (or whitespace-only) entry.
    #[error("{field}[{index}]: domain entry is empty")]
    EmptyDomain { field: ConfigField, index: usize },

    /// A domain list entry is not a bare host name (e.g. carries a scheme or path).
    #[error("{field}[{index}]: '{entry}' is not a valid domain: {reason}")]
    InvalidDomain {
        field: ConfigField,
        index: usize,
        entry: String,
        reason: String,
    },
}

impl ConfigurationError {
    /// Which configuration field failed validation.
    pub fn field(&self) -> ConfigField {
        match self {
            ConfigurationError::InvalidTargetUrl { .. } | ConfigurationError::MissingHost { .. } => {
                ConfigField::TargetUrl
            }
            ConfigurationError::EmptyDomain { field, .. }
            | ConfigurationError::InvalidDomain { field, .. } => *field,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
