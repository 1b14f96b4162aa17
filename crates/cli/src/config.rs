//! Settings loading for the command line.

use crate::error::{Error, Result};
use clap::Args;
use navigation::{Interceptor, Preferences};
use policy::PolicyHandle;
use settings::{Settings, SettingsPatch, Source};
use std::path::Path;
use std::sync::Arc;

/// Command-line overrides applied on top of the settings file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Target URL (its host becomes the origin domain)
    #[arg(long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Allowed domain; repeat to allow several. Replaces the configured list
    #[arg(long = "allow", value_name = "DOMAIN", global = true)]
    pub allow: Vec<String>,

    /// Blocked domain; repeat to block several. Replaces the configured list
    #[arg(long = "block", value_name = "DOMAIN", global = true)]
    pub block: Vec<String>,

    /// Match listed domains exactly, never their subdomains
    #[arg(long, global = true)]
    pub no_subdomains: bool,

    /// Turn domain restriction off
    #[arg(long, global = true)]
    pub unrestricted: bool,

    /// Open allowed new-window requests in the system browser
    #[arg(long, value_name = "BOOL", global = true)]
    pub open_externally: Option<bool>,
}

impl Overrides {
    pub fn patch(&self) -> SettingsPatch {
        SettingsPatch {
            target_url: self.url.clone(),
            restrict_to_domain: self.unrestricted.then_some(false),
            open_links_externally: self.open_externally,
            allowed_domains: non_empty(&self.allow),
            blocked_domains: non_empty(&self.block),
            allow_subdomains: self.no_subdomains.then_some(false),
        }
    }
}

fn non_empty(list: &[String]) -> Option<Vec<String>> {
    (!list.is_empty()).then(|| list.to_vec())
}

/// Load settings strictly: a missing file means defaults, a broken one is an error.
pub fn load(path: &Path, overrides: &Overrides) -> Result<(Settings, Source)> {
    let (settings, source) = if path.exists() {
        (Settings::load(path)?, Source::File(path.to_path_buf()))
    } else {
        (Settings::default(), Source::Default)
    };
    Ok((settings.merge(overrides.patch()), source))
}

/// Load settings, falling back to defaults if the file is unusable even
/// with the overrides applied.
pub fn load_lenient(path: &Path, overrides: &Overrides) -> (Settings, Source) {
    Settings::load_or_default(path, overrides.patch())
}

pub fn build_interceptor(settings: &Settings) -> Result<Interceptor> {
    let policy = settings.validate()?;
    Ok(Interceptor::new(
        Arc::new(PolicyHandle::new(policy)),
        preferences(settings),
    ))
}

/// Re-read settings and swap them into `interceptor`.
///
/// Preferences change only once the new policy is in force; on any error
/// both stay as they were.
pub fn reload(path: &Path, overrides: &Overrides, interceptor: &Interceptor) -> Result<()> {
    let (settings, _) = load(path, overrides)?;
    interceptor
        .policy()
        .reload(&settings.policy_config())
        .map_err(settings::Error::from)?;
    interceptor.set_preferences(preferences(&settings));
    Ok(())
}

/// Write default settings (with overrides) to `path`.
pub fn init(path: &Path, overrides: &Overrides, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let settings = Settings::default().merge(overrides.patch());
    settings.validate()?;
    settings.save(path)?;
    Ok(())
}

pub fn preferences(settings: &Settings) -> Preferences {
    Preferences {
        open_links_externally: settings.open_links_externally,
    }
}

pub fn describe(source: &Source) -> String {
    match source {
        Source::File(path) => path.display().to_string(),
        Source::Default => "defaults".to_string(),
    }
}
