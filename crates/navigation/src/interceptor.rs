//! Navigation interception.

use crate::{Request, RequestKind};
use arc_swap::ArcSwap;
use policy::{PolicyHandle, Reason, Verdict, hostname};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// User preferences layered on top of the policy verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Send allowed new-window requests to the system browser.
    pub open_links_externally: bool,
}

/// What the shell should do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Load the URL inside the shell.
    OpenInApp,
    /// Cancel in-app navigation and hand the URL to the system handler.
    OpenExternally,
    /// Cancel navigation and do nothing else.
    Block,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::OpenInApp => "open_in_app",
            Action::OpenExternally => "open_externally",
            Action::Block => "block",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The interceptor's answer for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub action: Action,
    pub verdict: Verdict,
}

/// Routes every navigation through the policy.
///
/// The policy verdict is the only authorization decision. Preferences can
/// move an allowed new-window request out of the app, but never let a
/// denied URL in.
#[derive(Debug)]
pub struct Interceptor {
    policy: Arc<PolicyHandle>,
    preferences: ArcSwap<Preferences>,
}

impl Interceptor {
    pub fn new(policy: Arc<PolicyHandle>, preferences: Preferences) -> Self {
        Self {
            policy,
            preferences: ArcSwap::from_pointee(preferences),
        }
    }

    /// The policy handle this interceptor reads from.
    pub fn policy(&self) -> &Arc<PolicyHandle> {
        &self.policy
    }

    pub fn preferences(&self) -> Preferences {
        **self.preferences.load()
    }

    pub fn set_preferences(&self, preferences: Preferences) {
        self.preferences.store(Arc::new(preferences));
    }

    /// Decide what to do with `request`.
    pub fn decide(&self, request: &Request) -> Decision {
        let verdict = self.policy.evaluate(&request.url);
        let action = route(verdict, request.kind, self.preferences());

        // Full URLs can carry credentials or tokens; only the host goes above debug.
        match action {
            Action::Block => {
                tracing::info!(
                    host = hostname(&request.url).as_deref().unwrap_or("-"),
                    kind = ?request.kind,
                    reason = %verdict.reason(),
                    "navigation blocked"
                );
                tracing::debug!(url = %request.url, "blocked url");
            }
            _ => tracing::debug!(
                url = %request.url,
                kind = ?request.kind,
                reason = %verdict.reason(),
                %action,
                "navigation routed"
            ),
        }

        Decision { action, verdict }
    }

    /// Shorthand for a same-window navigation.
    pub fn on_navigate(&self, url: &str) -> Decision {
        self.decide(&Request::same_window(url))
    }

    /// Shorthand for a new-window request.
    pub fn on_new_window(&self, url: &str) -> Decision {
        self.decide(&Request::new_window(url))
    }
}

fn route(verdict: Verdict, kind: RequestKind, preferences: Preferences) -> Action {
    match verdict.reason() {
        reason if reason.is_allowed() => match kind {
            RequestKind::NewWindow if preferences.open_links_externally => Action::OpenExternally,
            _ => Action::OpenInApp,
        },
        Reason::DeniedNotListed => Action::OpenExternally,
        _ => Action::Block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy::{DomainConfig, Policy, PolicyConfig};

    fn interceptor(open_links_externally: bool) -> Interceptor {
        let policy = Policy::build(&PolicyConfig {
            restrict_to_domain: true,
            domain_config: DomainConfig {
                allowed_domains: vec!["github.com".into()],
                blocked_domains: vec!["ads.github.com".into()],
                allow_subdomains: true,
            },
            target_url: "https://github.com".into(),
        })
        .unwrap();

        Interceptor::new(
            Arc::new(PolicyHandle::new(policy)),
            Preferences {
                open_links_externally,
            },
        )
    }

    #[test]
    fn test_allowed_same_window_stays_in_app() {
        for external in [false, true] {
            let decision = interceptor(external).on_navigate("https://api.github.com");
            assert_eq!(decision.action, Action::OpenInApp);
            assert_eq!(decision.verdict.reason(), Reason::AllowedSubdomain);
        }
    }

    #[test]
    fn test_allowed_new_window_follows_preference() {
        assert_eq!(
            interceptor(false).on_new_window("https://github.com").action,
            Action::OpenInApp
        );
        assert_eq!(
            interceptor(true).on_new_window("https://github.com").action,
            Action::OpenExternally
        );
    }

    #[test]
    fn test_unlisted_goes_external() {
        let interceptor = interceptor(false);
        assert_eq!(
            interceptor.on_navigate("https://gitlab.com").action,
            Action::OpenExternally
        );
        assert_eq!(
            interceptor.on_new_window("https://gitlab.com").action,
            Action::OpenExternally
        );
    }

    #[test]
    fn test_blocked_and_malformed_are_dropped() {
        let interceptor = interceptor(true);
        for url in ["https://ads.github.com", "https://x.ads.github.com", "not a url"] {
            assert_eq!(interceptor.on_navigate(url).action, Action::Block, "{url}");
            assert_eq!(interceptor.on_new_window(url).action, Action::Block, "{url}");
        }
    }

    #[test]
    fn test_preference_never_allows_denied() {
        let interceptor = interceptor(true);
        let decision = interceptor.on_new_window("https://gitlab.com");
        assert!(!decision.verdict.is_allowed());
        assert_ne!(decision.action, Action::OpenInApp);
    }

    #[test]
    fn test_set_preferences() {
        let interceptor = interceptor(false);
        interceptor.set_preferences(Preferences {
            open_links_externally: true,
        });
        assert!(interceptor.preferences().open_links_externally);
        assert_eq!(
            interceptor.on_new_window("https://github.com").action,
            Action::OpenExternally
        );
    }

    #[test]
    fn test_policy_reload_is_visible() {
        let interceptor = interceptor(false);
        assert_eq!(
            interceptor.on_navigate("https://docs.rs").action,
            Action::OpenExternally
        );

        interceptor
            .policy()
            .reload(&PolicyConfig {
                restrict_to_domain: false,
                domain_config: DomainConfig::default(),
                target_url: "https://github.com".into(),
            })
            .unwrap();

        let decision = interceptor.on_navigate("https://docs.rs");
        assert_eq!(decision.action, Action::OpenInApp);
        assert_eq!(decision.verdict.reason(), Reason::RestrictionDisabled);
    }

    #[test]
    fn test_decision_json_shape() {
        let decision = interceptor(false).on_navigate("https://github.com");
        assert_eq!(
            serde_json::to_value(decision).unwrap(),
            serde_json::json!({
                "action": "open_in_app",
                "verdict": { "allowed": true, "reason": "allowed-explicit" }
            })
        );
    }
}
