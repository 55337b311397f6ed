use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{Error, Result};
use crate::words::Word;

/// Built-in words served when the external API is unavailable.
pub const DEFAULT_WORDS: &[&str] = &[
    "RONALD", "DUMBLEDORE", "HERMIONE", "ELENA", "FLABBERGASTED",
    "PYTHON", "FLASK", "JAVASCRIPT", "HTML", "CSS", "API",
    "FINTECH", "BANKING", "ANALYST", "AUTOMATION", "RESEARCH",
    "COLLABORATE", "INNOVATE", "SOLUTION", "JPMORGAN", "INTEGRATE",
    "ENTERPRISE", "DATABASE", "ALGORITHM", "SECURITY", "DIGITAL",
];

/// A fixed, non-empty list of words to pick from at random.
///
/// Emptiness is rejected at construction, so [`choose`](FallbackList::choose)
/// cannot fail.
#[derive(Clone, Debug)]
pub struct FallbackList {
    words: Vec<Word>,
}

impl FallbackList {
    /// Normalises every entry and drops blank ones.
    ///
    /// Fails with [`Error::EmptyFallbackList`] if no word survives.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Word> = words.into_iter().filter_map(|w| Word::new(w.as_ref())).collect();
        if words.is_empty() {
            return Err(Error::EmptyFallbackList);
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Picks one word uniformly at random using the thread-local RNG.
    pub fn choose(&self) -> Word {
        self.choose_with(&mut rand::thread_rng())
    }

    pub fn choose_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        match self.words.choose(rng) {
            Some(word) => word.clone(),
            // Unreachable: `new` refuses empty lists.
            None => self.words[0].clone(),
        }
    }
}

impl Default for FallbackList {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().filter_map(|w| Word::new(w)).collect(),
        }
    }
}
