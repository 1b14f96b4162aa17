//! Property-based tests for the evaluator.
//!
//! These tests use proptest to verify invariants around:
//! - Block precedence over allow
//! - Suffix (not substring) subdomain matching
//! - Case-insensitive matching
//! - Totality over arbitrary input

use crate::{DomainConfig, Policy, PolicyConfig, Reason, evaluate};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A single DNS label.
fn arb_label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,10}").unwrap()
}

/// A registrable-looking domain like `abc.com`.
fn arb_domain() -> impl Strategy<Value = String> {
    (arb_label(), prop_oneof![Just("com"), Just("org"), Just("io"), Just("dev")])
        .prop_map(|(name, tld)| format!("{name}.{tld}"))
}

/// Randomly upper-case some characters.
fn arb_casing(s: String) -> impl Strategy<Value = String> {
    let len = s.len();
    prop::collection::vec(any::<bool>(), len).prop_map(move |flips| {
        s.chars()
            .zip(flips)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn build(
    restrict: bool,
    allowed: Vec<String>,
    blocked: Vec<String>,
    allow_subdomains: bool,
    origin: &str,
) -> Policy {
    Policy::build(&PolicyConfig {
        restrict_to_domain: restrict,
        domain_config: DomainConfig {
            allowed_domains: allowed,
            blocked_domains: blocked,
            allow_subdomains,
        },
        target_url: format!("https://{origin}/"),
    })
    .unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// With restriction disabled, every well-formed URL is allowed.
    #[test]
    fn restriction_disabled_allows_all(
        candidate in arb_domain(),
        allowed in prop::collection::vec(arb_domain(), 0..4),
        blocked in prop::collection::vec(arb_domain(), 0..4),
        subdomains in any::<bool>(),
        path in "[a-z/]{0,12}",
    ) {
        let policy = build(false, allowed, blocked, subdomains, "example.com");
        let verdict = evaluate(&policy, &format!("https://{candidate}/{path}"));
        prop_assert!(verdict.is_allowed());
        prop_assert_eq!(verdict.reason(), Reason::RestrictionDisabled);
    }

    /// A blocked domain is denied even when it is also allowed.
    #[test]
    fn block_wins_over_allow(domain in arb_domain(), subdomains in any::<bool>()) {
        let policy = build(true, vec![domain.clone()], vec![domain.clone()], subdomains, &domain);
        let verdict = evaluate(&policy, &format!("https://{domain}/"));
        prop_assert!(!verdict.is_allowed());
        prop_assert_eq!(verdict.reason(), Reason::BlockedExplicit);
    }

    /// Every subdomain of a blocked domain is denied when subdomains match.
    #[test]
    fn blocked_subdomains_denied(
        domain in arb_domain(),
        labels in prop::collection::vec(arb_label(), 1..4),
    ) {
        let host = format!("{}.{domain}", labels.join("."));
        let policy = build(true, vec![domain.clone()], vec![domain.clone()], true, &domain);
        prop_assert_eq!(
            evaluate(&policy, &format!("https://{host}/x")).reason(),
            Reason::BlockedSubdomain
        );
    }

    /// Without subdomain matching, strict subdomains are not listed.
    #[test]
    fn strict_subdomain_denied_when_disabled(domain in arb_domain(), label in arb_label()) {
        let policy = build(true, vec![domain.clone()], vec![], false, &domain);
        prop_assert_eq!(
            evaluate(&policy, &format!("https://{label}.{domain}")).reason(),
            Reason::DeniedNotListed
        );
    }

    /// Gluing a prefix onto a listed domain never matches it.
    #[test]
    fn suffix_is_not_substring(domain in arb_domain(), prefix in arb_label()) {
        let policy = build(true, vec![domain.clone()], vec![], true, &domain);
        prop_assert_eq!(
            evaluate(&policy, &format!("https://{prefix}{domain}")).reason(),
            Reason::DeniedNotListed
        );
    }

    /// With no allow list only the origin is allowed.
    #[test]
    fn origin_fallback_only_allows_origin(origin in arb_domain(), other in arb_domain()) {
        prop_assume!(origin != other);
        let policy = build(true, vec![], vec![], false, &origin);
        prop_assert_eq!(
            evaluate(&policy, &format!("https://{origin}/")).reason(),
            Reason::AllowedOriginFallback
        );
        prop_assert_eq!(
            evaluate(&policy, &format!("https://{other}/")).reason(),
            Reason::DeniedNotListed
        );
    }

    /// Config casing and candidate casing never change the outcome.
    #[test]
    fn matching_is_case_insensitive(
        (domain, config_casing, candidate_casing) in arb_domain().prop_flat_map(|d| {
            (Just(d.clone()), arb_casing(d.clone()), arb_casing(d))
        }),
    ) {
        let policy = build(true, vec![config_casing], vec![], false, "example.net");
        prop_assert_eq!(
            evaluate(&policy, &format!("https://{candidate_casing}/")).reason(),
            Reason::AllowedExplicit,
            "domain {}", domain
        );
    }

    /// The evaluator never panics, and anything without a host is malformed.
    #[test]
    fn evaluate_is_total(candidate in any::<String>(), restrict in any::<bool>()) {
        let policy = build(restrict, vec!["github.com".into()], vec![], true, "github.com");
        let verdict = evaluate(&policy, &candidate);
        if !candidate.contains(':') {
            prop_assert_eq!(verdict.reason(), Reason::DeniedMalformedUrl);
        }
    }
}
