//! Per-request access log.

use std::time::Instant;

use tracing::info;

use crate::response::Response;

/// Started when a request arrives; [`finish`](RequestTrace::finish) logs it.
pub(crate) struct RequestTrace {
    method: String,
    path: String,
    started: Instant,
}

impl RequestTrace {
    pub(crate) fn start(method: &http::Method, path: &str) -> Self {
        Self {
            method: method.as_str().to_owned(),
            path: path.to_owned(),
            started: Instant::now(),
        }
    }

    pub(crate) fn finish(self, resp: &Response) {
        let status: u16 = resp.status_code().into();
        info!(
            method = %self.method,
            path = %self.path,
            status,
            latency_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request served"
        );
    }
}
