//! Domain navigation policy.
//!
//! Core principle: **a page is shown only if the policy says so.**
//!
//! A [`Policy`] is built once from a [`PolicyConfig`] and never mutated.
//! [`evaluate`] is a pure function of a policy and a candidate URL, and is
//! the only place domain matching happens. [`PolicyHandle`] holds the policy
//! in force and swaps it wholesale on reload.
//!
//! # Example
//!
//! ```
//! use policy::{DomainConfig, Policy, PolicyConfig, Reason};
//!
//! let policy = Policy::build(&PolicyConfig {
//!     restrict_to_domain: true,
//!     domain_config: DomainConfig {
//!         allowed_domains: vec!["github.com".into()],
//!         blocked_domains: vec!["gist.github.com".into()],
//!         allow_subdomains: true,
//!     },
//!     target_url: "https://github.com".into(),
//! })?;
//!
//! assert!(policy.evaluate("https://api.github.com/repos").is_allowed());
//! assert_eq!(
//!     policy.evaluate("https://gist.github.com").reason(),
//!     Reason::BlockedExplicit
//! );
//! # Ok::<(), policy::ConfigurationError>(())
//! ```

mod error;
mod evaluate;
mod handle;
mod policy;
mod verdict;

#[cfg(test)]
mod properties;

pub use error::{ConfigField, ConfigurationError, Result};
pub use evaluate::evaluate;
pub use handle::PolicyHandle;
pub use policy::{DomainConfig, Policy, PolicyConfig, hostname};
pub use verdict::{Reason, Verdict};
