//! Incoming HTTP request type.

use http::HeaderMap;

/// An incoming HTTP request, as seen by a handler.
///
/// Only the headers are kept: every route wordsmith serves is a bodiless,
/// parameterless `GET`, and routing has already consumed method and path.
pub struct Request {
    pub(crate) headers: HeaderMap,
}

impl Request {
    pub(crate) fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
