use std::future::Future;

use thiserror::Error;

use crate::words::Word;

/// Why a word source did not produce a word.
///
/// Never reaches an HTTP caller: the provider logs it and falls back.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out")]
    Timeout,

    #[error("transport: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream answered {0}")]
    Status(http::StatusCode),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl FetchError {
    /// Coarse class for log lines: `transport`, `protocol` or `shape`.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Timeout | Self::Transport(_) => "transport",
            Self::Status(_) => "protocol",
            Self::Shape(_) => "shape",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Shape(e.to_string())
        } else {
            Self::Transport(e)
        }
    }
}

/// Something that can be asked for a single word.
pub trait WordSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Word, FetchError>> + Send;
}

/// Extracts the first word from a word-API body.
///
/// Accepts a JSON array whose first element is a non-blank string. Extra
/// elements are ignored, whatever their type. Anything else is a
/// [`FetchError::Shape`].
pub fn parse_word(body: &[u8]) -> Result<Word, FetchError> {
    let words: Option<Vec<serde_json::Value>> =
        serde_json::from_slice(body).map_err(|e| FetchError::Shape(format!("invalid json: {e}")))?;

    let first = words
        .ok_or_else(|| FetchError::Shape("null body".to_owned()))?
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Shape("empty array".to_owned()))?;

    let raw = first
        .as_str()
        .ok_or_else(|| FetchError::Shape(format!("first element is not a string: {first}")))?;

    Word::new(raw).ok_or_else(|| FetchError::Shape("first element is blank".to_owned()))
}
