//! Loading and saving settings files.

use crate::{Error, Result, Settings, SettingsPatch};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where a set of settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Read from this file.
    File(PathBuf),
    /// Built-in defaults, because the file was missing or unusable.
    Default,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse settings from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Load settings from `path` and apply `patch`, falling back to the
    /// patched defaults when the file is missing, unreadable, or the patched
    /// result does not describe a valid policy.
    ///
    /// The patch is applied before validation, so an override can repair a
    /// file without the rest of its rules being dropped.
    pub fn load_or_default(path: impl AsRef<Path>, patch: SettingsPatch) -> (Self, Source) {
        let path = path.as_ref();
        let loaded = Self::load(path).and_then(|settings| {
            let settings = settings.merge(patch.clone());
            settings.validate()?;
            Ok(settings)
        });

        match loaded {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                (settings, Source::File(path.to_path_buf()))
            }
            Err(Error::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                (Self::default().merge(patch), Source::Default)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unusable settings, using defaults");
                (Self::default().merge(patch), Source::Default)
            }
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }
}
