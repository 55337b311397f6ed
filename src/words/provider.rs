use tracing::{info, warn};

use crate::words::external::ExternalSource;
use crate::words::fallback::FallbackList;
use crate::words::source::{FetchError, WordSource};
use crate::words::Word;

/// Where a served word came from.
#[derive(Debug)]
pub enum Origin {
    External,
    Fallback(FetchError),
}

impl Origin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Produces one uppercase word per call: from the source when it cooperates,
/// otherwise from the fallback list.
#[derive(Debug)]
pub struct WordProvider<S = ExternalSource> {
    source: S,
    fallback: FallbackList,
}

impl<S: WordSource> WordProvider<S> {
    pub fn new(source: S, fallback: FallbackList) -> Self {
        Self { source, fallback }
    }

    pub fn fallback(&self) -> &FallbackList {
        &self.fallback
    }

    /// Never fails.
    pub async fn get_word(&self) -> Word {
        self.get_word_with_origin().await.0
    }

    /// Like [`get_word`](Self::get_word), also reporting which path was taken.
    pub async fn get_word_with_origin(&self) -> (Word, Origin) {
        match self.source.fetch().await {
            Ok(word) => {
                info!(%word, "serving word from external api");
                (word, Origin::External)
            }
            Err(e) => {
                let word = self.fallback.choose();
                warn!(reason = e.class(), error = %e, %word, "word api unavailable, serving fallback word");
                (word, Origin::Fallback(e))
            }
        }
    }
}
