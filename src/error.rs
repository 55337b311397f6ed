//! Unified error type.

use thiserror::Error;

/// The error type returned by wordsmith's fallible operations.
///
/// Request-level failures never show up here: a failed word fetch is
/// absorbed by the fallback path, and routing misses are expressed as HTTP
/// [`Response`](crate::Response) values. This type surfaces startup and
/// infrastructure failures only.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid config `{field}` = `{value}`: {reason}")]
    Config {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("fallback word list must contain at least one non-blank word")]
    EmptyFallbackList,
}

pub type Result<T> = std::result::Result<T, Error>;
