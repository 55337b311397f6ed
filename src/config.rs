//! Process configuration: command-line flags with environment fallbacks.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::error::{Error, Result};
use crate::words::{DEFAULT_WORD_API_URL, ExternalSource, FallbackList, WordProvider};

#[derive(Debug, Clone, Parser)]
#[command(name = "wordsmith")]
#[command(about = "Serves random uppercase words over HTTP")]
pub struct Config {
    #[arg(long, env = "WORDSMITH_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    #[arg(long, env = "WORDSMITH_WORD_API_URL", default_value = DEFAULT_WORD_API_URL)]
    pub word_api_url: String,

    #[arg(long, env = "WORDSMITH_WORD_API_TIMEOUT_SECS", default_value = "5")]
    pub word_api_timeout_secs: u64,

    /// Replaces the built-in fallback words (comma-separated).
    #[arg(long, env = "WORDSMITH_FALLBACK_WORDS", value_delimiter = ',')]
    pub fallback_words: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Config {
    pub fn word_api_timeout(&self) -> Duration {
        Duration::from_secs(self.word_api_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        validate_url("word_api_url", &self.word_api_url)?;

        if self.word_api_timeout_secs == 0 {
            return Err(Error::Config {
                field: "word_api_timeout_secs",
                value: "0".to_owned(),
                reason: "timeout must be at least one second".to_owned(),
            });
        }

        Ok(())
    }

    /// The fallback list: the configured words if any were given, the
    /// built-in list otherwise.
    pub fn fallback_list(&self) -> Result<FallbackList> {
        if self.fallback_words.is_empty() {
            Ok(FallbackList::default())
        } else {
            FallbackList::new(&self.fallback_words)
        }
    }

    /// Builds the provider the server hands to every request.
    pub fn word_provider(&self) -> Result<WordProvider> {
        let source = ExternalSource::new(&self.word_api_url, self.word_api_timeout())?;
        Ok(WordProvider::new(source, self.fallback_list()?))
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<()> {
    let invalid = |reason: String| Error::Config { field, value: value.to_owned(), reason };

    let url = Url::parse(value).map_err(|e| invalid(format!("invalid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("unsupported URL scheme: {scheme}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("wordsmith").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);

        assert_eq!(config.bind, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.word_api_url, DEFAULT_WORD_API_URL);
        assert_eq!(config.word_api_timeout(), Duration::from_secs(5));
        assert!(config.fallback_words.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fallback_words_are_comma_separated() {
        let config = parse(&["--fallback-words", "whale,otter"]);
        let list = config.fallback_list().unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.words()[0].as_str(), "WHALE");
    }

    #[test]
    fn blank_fallback_words_fail_fast() {
        let config = parse(&["--fallback-words", " , "]);
        assert!(matches!(config.fallback_list(), Err(Error::EmptyFallbackList)));
        assert!(config.word_provider().is_err());
    }

    #[test]
    fn rejects_non_http_url() {
        let config = parse(&["--word-api-url", "ftp://example.com/words"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported URL scheme"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = parse(&["--word-api-timeout-secs", "0"]);
        assert!(matches!(
            config.validate(),
            Err(Error::Config { field: "word_api_timeout_secs", .. })
        ));
    }
}
