//! Navigation interception for the shell.
//!
//! The shell reports every same-window navigation and every new-window
//! request to an [`Interceptor`], which asks the [`policy`] for a verdict and
//! turns it into an [`Action`]:
//!
//! | verdict                               | same window      | new window                              |
//! |---------------------------------------|------------------|-----------------------------------------|
//! | allowed                               | `OpenInApp`      | `OpenExternally` if preferred, else `OpenInApp` |
//! | `denied-not-listed`                   | `OpenExternally` | `OpenExternally`                        |
//! | `blocked-*`, `denied-malformed-url`   | `Block`          | `Block`                                 |

mod interceptor;
mod request;

pub use interceptor::{Action, Decision, Interceptor, Preferences};
pub use request::{Request, RequestKind};
