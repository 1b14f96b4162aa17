//! Domain authorization.
//!
//! The order of checks below is a security property: a malformed URL is
//! denied before anything else, the global switch is consulted next, and
//! the block list is exhausted before the allow list is looked at.

use crate::policy::hostname;
use crate::{Policy, Reason, Verdict};
use std::collections::BTreeSet;

/// Decide whether `candidate` may be displayed under `policy`.
///
/// Total over all inputs: anything that is not an absolute URL with a
/// hostname is denied with [`Reason::DeniedMalformedUrl`].
pub fn evaluate(policy: &Policy, candidate: &str) -> Verdict {
    decide(policy, candidate).into()
}

impl Policy {
    /// Shorthand for [`evaluate`].
    pub fn evaluate(&self, candidate: &str) -> Verdict {
        evaluate(self, candidate)
    }
}

fn decide(policy: &Policy, candidate: &str) -> Reason {
    let Some(domain) = hostname(candidate) else {
        return Reason::DeniedMalformedUrl;
    };

    if !policy.restriction_enabled() {
        return Reason::RestrictionDisabled;
    }

    let subdomains = policy.allow_subdomains();

    match match_list(policy.blocked_domains(), &domain, subdomains) {
        Some(Match::Exact) => return Reason::BlockedExplicit,
        Some(Match::Subdomain) => return Reason::BlockedSubdomain,
        None => {}
    }

    if policy.allowed_domains().is_empty() {
        let origin = policy.origin_domain();
        return if domain == origin || (subdomains && is_subdomain_of(&domain, origin)) {
            Reason::AllowedOriginFallback
        } else {
            Reason::DeniedNotListed
        };
    }

    match match_list(policy.allowed_domains(), &domain, subdomains) {
        Some(Match::Exact) => Reason::AllowedExplicit,
        Some(Match::Subdomain) => Reason::AllowedSubdomain,
        None => Reason::DeniedNotListed,
    }
}

enum Match {
    Exact,
    Subdomain,
}

fn match_list(list: &BTreeSet<String>, domain: &str, subdomains: bool) -> Option<Match> {
    if list.contains(domain) {
        return Some(Match::Exact);
    }
    if subdomains && list.iter().any(|entry| is_subdomain_of(domain, entry)) {
        return Some(Match::Subdomain);
    }
    None
}

/// `domain` ends with `"." + parent`. Not a substring test: `evilgithub.com`
/// is not a subdomain of `github.com`.
fn is_subdomain_of(domain: &str, parent: &str) -> bool {
    domain
        .strip_suffix(parent)
        .is_some_and(|rest| rest.ends_with('.'))
}
