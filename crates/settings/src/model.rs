//! The persisted settings shape.

use policy::{DomainConfig, Policy, PolicyConfig};
use serde::{Deserialize, Serialize};

/// URL the shell opens at startup when nothing else is configured.
pub const DEFAULT_TARGET_URL: &str = "https://example.com";

/// Shell settings as stored on disk.
///
/// Every field is optional in the file; missing fields take their
/// [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Enforce the domain policy at all.
    pub restrict_to_domain: bool,

    /// Hand allowed new-window requests to the system browser.
    pub open_links_externally: bool,

    pub target: Target,

    pub domain_config: DomainConfig,
}

/// The site the shell wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub url: String,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restrict_to_domain: true,
            open_links_externally: true,
            target: Target::default(),
            domain_config: DomainConfig::default(),
        }
    }
}

/// Overrides applied on top of loaded settings (e.g. from the command line).
///
/// `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub target_url: Option<String>,
    pub restrict_to_domain: Option<bool>,
    pub open_links_externally: Option<bool>,
    pub allowed_domains: Option<Vec<String>>,
    pub blocked_domains: Option<Vec<String>>,
    pub allow_subdomains: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    /// Apply `patch`, replacing every field it sets.
    pub fn merge(mut self, patch: SettingsPatch) -> Self {
        if let Some(url) = patch.target_url {
            self.target.url = url;
        }
        if let Some(restrict) = patch.restrict_to_domain {
            self.restrict_to_domain = restrict;
        }
        if let Some(external) = patch.open_links_externally {
            self.open_links_externally = external;
        }
        if let Some(allowed) = patch.allowed_domains {
            self.domain_config.allowed_domains = allowed;
        }
        if let Some(blocked) = patch.blocked_domains {
            self.domain_config.blocked_domains = blocked;
        }
        if let Some(subdomains) = patch.allow_subdomains {
            self.domain_config.allow_subdomains = subdomains;
        }
        self
    }

    /// The policy-relevant part of these settings.
    pub fn policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            restrict_to_domain: self.restrict_to_domain,
            domain_config: self.domain_config.clone(),
            target_url: self.target.url.clone(),
        }
    }

    /// Validate these settings into a [`Policy`].
    pub fn validate(&self) -> crate::Result<Policy> {
        Ok(Policy::build(&self.policy_config())?)
    }
}
