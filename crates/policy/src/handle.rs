//! Shared, reloadable access to the current policy.

use crate::{Policy, PolicyConfig, Result, Verdict};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// The policy currently in force, swappable as a whole.
///
/// Readers take a snapshot with [`current`](Self::current) and evaluate
/// against it; a concurrent [`reload`](Self::reload) never changes a
/// snapshot that is already held.
#[derive(Debug)]
pub struct PolicyHandle {
    current: ArcSwap<Policy>,
}

impl PolicyHandle {
    pub fn new(policy: Policy) -> Self {
        Self {
            current: ArcSwap::from_pointee(policy),
        }
    }

    /// The policy in force right now.
    pub fn current(&self) -> Arc<Policy> {
        self.current.load_full()
    }

    /// Evaluate `candidate` against a single consistent snapshot.
    pub fn evaluate(&self, candidate: &str) -> Verdict {
        self.current.load().evaluate(candidate)
    }

    /// Install `policy`, returning the one it replaced.
    pub fn replace(&self, policy: Policy) -> Arc<Policy> {
        self.current.swap(Arc::new(policy))
    }

    /// Build a policy from `config` and install it.
    ///
    /// On failure the current policy stays in force and the error is returned.
    pub fn reload(&self, config: &PolicyConfig) -> Result<()> {
        match Policy::build(config) {
            Ok(policy) => {
                tracing::info!(
                    origin = policy.origin_domain(),
                    allowed = policy.allowed_domains().len(),
                    blocked = policy.blocked_domains().len(),
                    "policy reloaded"
                );
                self.replace(policy);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(field = %e.field(), error = %e, "policy reload rejected, keeping previous policy");
                Err(e)
            }
        }
    }
}

impl From<Policy> for PolicyHandle {
    fn from(policy: Policy) -> Self {
        Self::new(policy)
    }
}
