//! Words and where they come from.
//!
//! A [`WordProvider`] asks its [`WordSource`] (normally the external word API)
//! for one word and falls back to a [`FallbackList`] whenever that fails.

mod external;
mod fallback;
mod provider;
mod source;

use std::fmt;

use serde::Serialize;

pub use external::{ExternalSource, DEFAULT_WORD_API_URL};
pub use fallback::{DEFAULT_WORDS, FallbackList};
pub use provider::{Origin, WordProvider};
pub use source::{FetchError, WordSource, parse_word};

/// A non-empty, uppercase word.
///
/// The only constructor is [`Word::new`], so every `Word` in the program
/// has been trimmed and uppercased.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Trims and uppercases `raw`. Returns `None` if nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
