use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::words::source::{FetchError, WordSource, parse_word};
use crate::words::Word;

/// Public random-word API; answers `GET ?number=1` with e.g. `["whale"]`.
pub const DEFAULT_WORD_API_URL: &str = "https://random-word-api.herokuapp.com/word";

/// Fetches one word per call from an HTTP word API.
///
/// One attempt per call, bounded by the client timeout. No retries.
#[derive(Clone, Debug)]
pub struct ExternalSource {
    client: Client,
    url: Url,
}

impl ExternalSource {
    /// `timeout` bounds the whole exchange: connect, headers and body.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::Config {
            field: "word_api_url",
            value: url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, url })
    }
}

impl WordSource for ExternalSource {
    async fn fetch(&self) -> std::result::Result<Word, FetchError> {
        let response = self
            .client
            .get(self.url.as_str())
            .query(&[("number", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "word api answered");
        parse_word(&body)
    }
}
