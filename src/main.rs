use std::sync::Arc;

use clap::Parser;
use wordsmith::middleware::Cors;
use wordsmith::{Config, Server, api, logger};

#[tokio::main]
async fn main() {
    let config = Config::parse();
    logger::init(config.verbose, config.log_json);

    if let Err(e) = run(config).await {
        tracing::error!("wordsmith failed: {e}");
        eprintln!("wordsmith: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> wordsmith::Result<()> {
    tracing::debug!(?config, "configuration loaded");
    config.validate()?;

    let provider = Arc::new(config.word_provider()?);
    tracing::info!(
        word_api = %config.word_api_url,
        timeout_secs = config.word_api_timeout_secs,
        fallback_words = provider.fallback().len(),
        "word provider ready"
    );

    Server::bind(config.bind)
        .cors(Cors::permissive())
        .serve(api::app(provider))
        .await
}
