//! Persisted shell settings.
//!
//! Settings live in a small TOML file. Only the shape of the domain policy
//! is interpreted here; [`Settings::validate`] hands it to [`policy`] for
//! the single validation pass that produces a [`policy::Policy`].
//!
//! # Example
//!
//! ```
//! use settings::{Settings, SettingsPatch};
//!
//! let settings = Settings::parse(r#"
//! [target]
//! url = "https://github.com"
//!
//! [domainConfig]
//! blockedDomains = ["gist.github.com"]
//! "#)?
//! .merge(SettingsPatch {
//!     allow_subdomains: Some(false),
//!     ..Default::default()
//! });
//!
//! let policy = settings.validate()?;
//! assert!(policy.evaluate("https://github.com/rust-lang").is_allowed());
//! assert!(!policy.evaluate("https://api.github.com").is_allowed());
//! # Ok::<(), settings::Error>(())
//! ```

mod error;
mod model;
mod store;

pub use error::{Error, Result};
pub use model::{DEFAULT_TARGET_URL, Settings, SettingsPatch, Target};
pub use store::Source;
