//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight request run to completion, and closes idle
//!    keep-alive connections.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.
//!
//! A word request is bounded by the word API timeout, so the drain never
//! takes much longer than that.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::method::Method;
use crate::middleware::Cors;
use crate::middleware::trace::RequestTrace;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Lookup, Router};
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    cors: Option<Cors>,
}

/// Everything a connection task needs, shared behind one `Arc`.
struct Shared {
    router: Router,
    cors: Option<Cors>,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use wordsmith::Server;
    /// let server = Server::bind(([127, 0, 0, 1], 5000).into());
    /// ```
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr, cors: None }
    }

    /// Applies `cors` to every request: preflights are answered directly,
    /// other responses get the allow-origin header.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Binds, then serves `router` until SIGTERM or Ctrl-C and all in-flight
    /// requests have completed.
    pub async fn serve(self, router: Router) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve_on(listener, router, shutdown_signal()).await
    }

    /// Serves `router` on an already-bound `listener` until `shutdown`
    /// resolves, then drains in-flight connections.
    ///
    /// The address passed to [`Server::bind`] is ignored here.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        router: Router,
        shutdown: impl Future<Output = ()>,
    ) -> Result<()> {
        let local_addr = listener.local_addr()?;
        let shared = Arc::new(Shared { router, cors: self.cors });

        info!(addr = %local_addr, "wordsmith listening");

        let mut tasks = tokio::task::JoinSet::new();
        // Fires once on shutdown so idle keep-alive connections close instead
        // of holding the drain open.
        let (drain_tx, drain_rx) = watch::channel(());
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting immediately,
                // even if more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let shared = Arc::clone(&shared);
                    let mut drain = drain_rx.clone();
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let shared = Arc::clone(&shared);
                            async move { dispatch(&shared, req).await }
                        });

                        // Handles HTTP/1.1 and HTTP/2, whichever the client speaks.
                        let builder = ConnBuilder::new(TokioExecutor::new());
                        let conn = builder.serve_connection(io, svc);
                        tokio::pin!(conn);

                        let res = tokio::select! {
                            res = conn.as_mut() => res,
                            _ = drain.changed() => {
                                conn.as_mut().graceful_shutdown();
                                conn.await
                            }
                        };
                        if let Err(e) = res {
                            debug!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the set stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drain_tx.send_replace(());
        while tasks.join_next().await.is_some() {}

        info!("wordsmith stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response. Every failure becomes an
/// HTTP status, so hyper never sees an error.
async fn dispatch<B>(
    shared: &Shared,
    req: hyper::Request<B>,
) -> std::result::Result<http::Response<Full<Bytes>>, Infallible> {
    let trace = RequestTrace::start(req.method(), req.uri().path());
    let mut response = route(shared, req).await;

    if let Some(cors) = &shared.cors {
        cors.apply(&mut response);
    }

    trace.finish(&response);
    Ok(response.into_inner())
}

async fn route<B>(shared: &Shared, req: hyper::Request<B>) -> Response {
    let Ok(method) = Method::try_from(req.method()) else {
        return Response::status(Status::MethodNotAllowed);
    };
    let (parts, _) = req.into_parts();
    let req = Request::new(parts.headers);
    let path = parts.uri.path();

    if method == Method::Options {
        if let Some(cors) = &shared.cors {
            return cors.preflight(&req);
        }
    }

    let lookup = match shared.router.lookup(method, path) {
        Lookup::Found(handler) => Lookup::Found(handler),
        // Without an explicit HEAD route, HEAD runs the GET handler.
        miss if method == Method::Head => match shared.router.lookup(Method::Get, path) {
            Lookup::Found(handler) => {
                let mut resp = handler.call(req).await;
                resp.strip_body();
                return resp;
            }
            _ => miss,
        },
        miss => miss,
    };

    match lookup {
        Lookup::Found(handler) => handler.call(req).await,
        Lookup::MethodNotAllowed(allowed) => {
            let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
            Response::builder()
                .status(Status::MethodNotAllowed)
                .header("allow", &allow)
                .no_body()
        }
        Lookup::NotFound => Response::status(Status::NotFound),
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). On Windows only Ctrl-C
/// is available. A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn word(_req: Request) -> Response {
        Response::json(br#"{"word":"WHALE"}"#.to_vec())
    }

    fn shared(cors: Option<Cors>) -> Shared {
        Shared { router: Router::new().get("/api/random_word", word), cors }
    }

    fn request(method: &str, path: &str) -> hyper::Request<()> {
        hyper::Request::builder().method(method).uri(path).body(()).unwrap()
    }

    #[tokio::test]
    async fn routes_get_and_stamps_cors() {
        let resp = dispatch(&shared(Some(Cors::permissive())), request("GET", "/api/random_word"))
            .await
            .unwrap();

        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn options_is_a_preflight_when_cors_enabled() {
        let resp = dispatch(&shared(Some(Cors::permissive())), request("OPTIONS", "/anything"))
            .await
            .unwrap();

        assert_eq!(resp.status(), http::StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["access-control-allow-methods"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn options_without_cors_falls_through_to_routing() {
        let resp = dispatch(&shared(None), request("OPTIONS", "/api/random_word"))
            .await
            .unwrap();

        assert_eq!(resp.status(), http::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD");
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn head_runs_get_handler_without_body() {
        let resp = dispatch(&shared(Some(Cors::permissive())), request("HEAD", "/api/random_word"))
            .await
            .unwrap();

        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn head_on_unknown_path_is_not_found() {
        let resp = dispatch(&shared(None), request("HEAD", "/missing")).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_lists_get_and_head_as_allowed() {
        let resp = dispatch(&shared(None), request("POST", "/api/random_word")).await.unwrap();

        assert_eq!(resp.status(), http::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD");
    }

    #[tokio::test]
    async fn unknown_method_and_path() {
        let s = shared(None);

        let resp = dispatch(&s, request("PURGE", "/api/random_word")).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::METHOD_NOT_ALLOWED);

        let resp = dispatch(&s, request("GET", "/missing")).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
    }
}
