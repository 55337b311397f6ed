//! Routes served by wordsmith.
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | `GET` | `/api/random_word` | `{"word": "WHALE"}` |
//! | `GET` | `/healthz` | `ok` |
//! | `GET` | `/readyz` | `ready` |

use std::sync::Arc;

use serde::Serialize;

use crate::health;
use crate::response::Json;
use crate::router::Router;
use crate::words::{Word, WordProvider, WordSource};
use crate::Request;

pub const RANDOM_WORD_PATH: &str = "/api/random_word";

/// JSON payload of `GET /api/random_word`.
#[derive(Debug, Serialize)]
pub struct WordBody {
    pub word: Word,
}

/// `GET /api/random_word`. Always `200 OK`.
pub async fn random_word<S: WordSource>(provider: &WordProvider<S>, _req: Request) -> Json<WordBody> {
    Json(WordBody { word: provider.get_word().await })
}

/// Assembles the application router around a shared provider.
pub fn app<S: WordSource + 'static>(provider: Arc<WordProvider<S>>) -> Router {
    Router::new()
        .get(RANDOM_WORD_PATH, move |req| {
            let provider = Arc::clone(&provider);
            async move { random_word(&provider, req).await }
        })
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}
