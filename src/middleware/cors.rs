//! Cross-origin resource sharing.
//!
//! The word endpoint is consumed by pages loaded from other origins (or
//! straight from `file://`), so the browser must be told it may read the
//! response. Two jobs:
//!
//! 1. Answer `OPTIONS` preflights before routing, with `204 No Content`.
//! 2. Add `access-control-allow-origin: *` to every other response.

use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

const ALLOW_ORIGIN: &str = "*";

/// A CORS policy applied by the server around every request.
#[derive(Clone, Debug)]
pub struct Cors {
    allow_methods: String,
    default_allow_headers: String,
    max_age_secs: u32,
}

impl Cors {
    /// Any origin may call any route with `GET`, `HEAD` or `OPTIONS`, sending
    /// whatever headers its preflight asks for.
    pub fn permissive() -> Self {
        Self {
            allow_methods: "GET, HEAD, OPTIONS".to_owned(),
            default_allow_headers: "content-type".to_owned(),
            max_age_secs: 86_400,
        }
    }

    /// The preflight answer for an `OPTIONS` request.
    ///
    /// `access-control-allow-headers` echoes the request's
    /// `access-control-request-headers` when present.
    pub fn preflight(&self, req: &Request) -> Response {
        let allow_headers = req
            .header("access-control-request-headers")
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.default_allow_headers);

        Response::builder()
            .status(Status::NoContent)
            .header("access-control-allow-origin", ALLOW_ORIGIN)
            .header("access-control-allow-methods", &self.allow_methods)
            .header("access-control-allow-headers", allow_headers)
            .header("access-control-max-age", &self.max_age_secs.to_string())
            .no_body()
    }

    /// Stamps the allow-origin header onto an outgoing response.
    pub fn apply(&self, resp: &mut Response) {
        resp.set_header("access-control-allow-origin", ALLOW_ORIGIN);
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderMap;

    use super::*;

    fn options(headers: &[(&'static str, &'static str)]) -> Request {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(*name, value.parse().unwrap());
        }
        Request::new(map)
    }

    #[test]
    fn preflight_allows_any_origin() {
        let resp = Cors::permissive().preflight(&options(&[]));

        assert_eq!(resp.status_code(), Status::NoContent);
        assert_eq!(resp.header("access-control-allow-origin"), Some("*"));
        assert_eq!(resp.header("access-control-allow-methods"), Some("GET, HEAD, OPTIONS"));
        assert_eq!(resp.header("access-control-allow-headers"), Some("content-type"));
        assert_eq!(resp.header("access-control-max-age"), Some("86400"));
        assert!(resp.body().is_empty());
    }

    #[test]
    fn preflight_echoes_requested_headers() {
        let req = options(&[
            ("origin", "null"),
            ("access-control-request-headers", "x-requested-with, authorization"),
        ]);
        let resp = Cors::permissive().preflight(&req);

        assert_eq!(
            resp.header("access-control-allow-headers"),
            Some("x-requested-with, authorization")
        );
    }

    #[test]
    fn blank_requested_headers_use_default() {
        let req = options(&[("access-control-request-headers", " ")]);
        let resp = Cors::permissive().preflight(&req);

        assert_eq!(resp.header("access-control-allow-headers"), Some("content-type"));
    }

    #[test]
    fn apply_stamps_wildcard_origin() {
        let mut resp = Response::text("ok");
        Cors::permissive().apply(&mut resp);

        assert_eq!(resp.header("access-control-allow-origin"), Some("*"));
    }
}
