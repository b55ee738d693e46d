//! Public page themes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual theme of a public page.
///
/// Stored as a lowercase key. Keys that no longer map to a known theme
/// render with [`Theme::Classic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    Minimal,
    Gradient,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Classic, Theme::Dark, Theme::Minimal, Theme::Gradient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Dark => "dark",
            Self::Minimal => "minimal",
            Self::Gradient => "gradient",
        }
    }

    /// Strict lookup used when validating owner input.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }

    /// Lenient lookup used when reading stored rows.
    pub fn from_key_or_default(key: &str) -> Self {
        Self::parse(key).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
