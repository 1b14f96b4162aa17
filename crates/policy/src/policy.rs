//! Policy configuration and construction.

use crate::{ConfigField, ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::{Host, Url};

/// Domain rules as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainConfig {
    /// Domains the shell may display. Empty means "the target's domain only".
    pub allowed_domains: Vec<String>,

    /// Domains the shell must never display (overrides allow).
    pub blocked_domains: Vec<String>,

    /// Whether `a.example.com` matches an `example.com` entry.
    pub allow_subdomains: bool,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
            allow_subdomains: true,
        }
    }
}

/// Raw input to [`Policy::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Master switch. When false every well-formed URL is allowed.
    pub restrict_to_domain: bool,

    #[serde(default)]
    pub domain_config: DomainConfig,

    /// The URL the shell opens at startup; its host becomes the origin domain.
    pub target_url: String,
}

/// A validated, normalized snapshot of the domain rules.
///
/// All domains are stored lower-cased. A `Policy` never changes after
/// [`Policy::build`]; reloading means building a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Policy {
    restriction_enabled: bool,
    allowed_domains: BTreeSet<String>,
    blocked_domains: BTreeSet<String>,
    allow_subdomains: bool,
    origin_domain: String,
}

impl Policy {
    /// Validate raw configuration and build a policy from it.
    pub fn build(config: &PolicyConfig) -> Result<Self> {
        let origin_domain = origin_of(&config.target_url)?;
        let allowed_domains = normalize_list(
            ConfigField::AllowedDomains,
            &config.domain_config.allowed_domains,
        )?;
        let blocked_domains = normalize_list(
            ConfigField::BlockedDomains,
            &config.domain_config.blocked_domains,
        )?;

        Ok(Self {
            restriction_enabled: config.restrict_to_domain,
            allowed_domains,
            blocked_domains,
            allow_subdomains: config.domain_config.allow_subdomains,
            origin_domain,
        })
    }

    pub fn restriction_enabled(&self) -> bool {
        self.restriction_enabled
    }

    pub fn allowed_domains(&self) -> &BTreeSet<String> {
        &self.allowed_domains
    }

    pub fn blocked_domains(&self) -> &BTreeSet<String> {
        &self.blocked_domains
    }

    pub fn allow_subdomains(&self) -> bool {
        self.allow_subdomains
    }

    /// Lower-cased hostname of the configured target URL.
    pub fn origin_domain(&self) -> &str {
        &self.origin_domain
    }
}

/// Lower-cased hostname of an absolute URL, or `None` if there is none.
///
/// Internationalized names come back in their ASCII (`xn--`) form.
pub fn hostname(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(host.to_ascii_lowercase()),
        _ => None,
    }
}

fn origin_of(target_url: &str) -> Result<String> {
    let url = Url::parse(target_url).map_err(|e| ConfigurationError::InvalidTargetUrl {
        url: target_url.to_string(),
        reason: e.to_string(),
    })?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_ascii_lowercase()),
        _ => Err(ConfigurationError::MissingHost {
            url: target_url.to_string(),
        }),
    }
}

fn normalize_list(field: ConfigField, entries: &[String]) -> Result<BTreeSet<String>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let domain = entry.trim();
            if domain.is_empty() {
                return Err(ConfigurationError::EmptyDomain { field, index });
            }
            // Same host parser as candidate URLs, so IDN entries compare in punycode.
            Host::parse(domain)
                .map(|host| host.to_string().to_ascii_lowercase())
                .map_err(|e| ConfigurationError::InvalidDomain {
                    field,
                    index,
                    entry: entry.clone(),
                    reason: e.to_string(),
                })
        })
        .collect()
}
