//! Middleware layer.
//!
//! Cross-cutting concerns the server wraps around every dispatch:
//!
//! - [`cors`] answers preflight requests and stamps the allow-origin header
//! - [`trace`] logs one line per request with method, path, status, latency

pub mod cors;
pub mod trace;

pub use cors::Cors;
