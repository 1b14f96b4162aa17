//! Navigation requests as the page makes them.

use serde::{Deserialize, Serialize};

/// How the page asked to go somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// A link, redirect or script navigation in the current window.
    #[default]
    SameWindow,
    /// `target="_blank"`, `window.open` and friends.
    NewWindow,
}

/// A navigation attempt intercepted from the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub kind: RequestKind,
}

impl Request {
    pub fn same_window(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: RequestKind::SameWindow,
        }
    }

    pub fn new_window(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: RequestKind::NewWindow,
        }
    }
}
