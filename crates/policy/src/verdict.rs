//! Evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a URL was allowed or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    /// Domain restriction is switched off.
    RestrictionDisabled,
    /// The host is listed in `blockedDomains`.
    BlockedExplicit,
    /// The host is a subdomain of a `blockedDomains` entry.
    BlockedSubdomain,
    /// The host is listed in `allowedDomains`.
    AllowedExplicit,
    /// The host is a subdomain of an `allowedDomains` entry.
    AllowedSubdomain,
    /// No allow list is configured and the host is the origin domain (or below it).
    AllowedOriginFallback,
    /// The host matched nothing the policy allows.
    DeniedNotListed,
    /// The candidate is not an absolute URL with a hostname.
    DeniedMalformedUrl,
}

impl Reason {
    /// The reason's tag, e.g. `blocked-subdomain`.
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::RestrictionDisabled => "restriction-disabled",
            Reason::BlockedExplicit => "blocked-explicit",
            Reason::BlockedSubdomain => "blocked-subdomain",
            Reason::AllowedExplicit => "allowed-explicit",
            Reason::AllowedSubdomain => "allowed-subdomain",
            Reason::AllowedOriginFallback => "allowed-origin-fallback",
            Reason::DeniedNotListed => "denied-not-listed",
            Reason::DeniedMalformedUrl => "denied-malformed-url",
        }
    }

    pub fn is_allowed(self) -> bool {
        matches!(
            self,
            Reason::RestrictionDisabled
                | Reason::AllowedExplicit
                | Reason::AllowedSubdomain
                | Reason::AllowedOriginFallback
        )
    }

    pub fn is_blocked(self) -> bool {
        matches!(self, Reason::BlockedExplicit | Reason::BlockedSubdomain)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one URL against a policy.
///
/// `allowed` is always consistent with `reason`: a verdict can only be
/// built from its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Verdict {
    allowed: bool,
    reason: Reason,
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }
}

impl From<Reason> for Verdict {
    fn from(reason: Reason) -> Self {
        Self {
            allowed: reason.is_allowed(),
            reason,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.allowed { "allowed" } else { "denied" };
        write!(f, "{outcome} ({})", self.reason)
    }
}
