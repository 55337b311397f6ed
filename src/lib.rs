//! # wordsmith
//!
//! Serves one random uppercase word per request.
//!
//! `GET /api/random_word` answers `{"word": "WHALE"}`. The word comes from an
//! external word API when it answers in time with a usable body, and from a
//! fixed local list otherwise. The endpoint itself never fails.
//!
//! The HTTP layer is small and built on hyper:
//!
//! - Radix-tree routing via [`matchit`]
//! - HTTP/1.1 and HTTP/2 through `hyper-util`'s auto connection builder
//! - Permissive CORS and a per-request access log as middleware
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use wordsmith::middleware::Cors;
//! use wordsmith::words::{DEFAULT_WORD_API_URL, ExternalSource, FallbackList, WordProvider};
//! use wordsmith::{Server, api};
//!
//! #[tokio::main]
//! async fn main() -> wordsmith::Result<()> {
//!     let source = ExternalSource::new(DEFAULT_WORD_API_URL, Duration::from_secs(5))?;
//!     let provider = Arc::new(WordProvider::new(source, FallbackList::default()));
//!
//!     Server::bind(([127, 0, 0, 1], 5000).into())
//!         .cors(Cors::permissive())
//!         .serve(api::app(provider))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod health;
pub mod logger;
pub mod middleware;
pub mod words;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
