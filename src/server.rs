//! HTTP server, request dispatch and graceful shutdown.
//!
//! The listener is an owned value inside [`Server::serve`], not a
//! module-level global: constructed once at startup, torn down when the
//! process receives SIGTERM or Ctrl-C. Shutdown is graceful:
//!
//! 1. `listener.accept()` stops immediately; no new connections are made.
//! 2. Every in-flight connection task runs to completion.
//! 3. [`Server::serve`] returns, letting `main` exit cleanly.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::routes;

const GENERIC_FAULT_MESSAGE: &str = "An unexpected error occurred";

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    expose_errors: bool,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr, expose_errors: false }
    }

    /// Whether 500 responses carry the underlying panic text.
    ///
    /// Off by default; `main` turns it on outside production (see
    /// [`Config::expose_errors`](crate::Config::expose_errors)).
    pub fn expose_errors(mut self, expose: bool) -> Self {
        self.expose_errors = expose;
        self
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        // Shared across concurrent connection tasks without copying the
        // routing table.
        let state = Arc::new(AppState { router, expose_errors: self.expose_errors });

        info!(addr = %self.addr, "vesper listening");

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` makes select! check arms top-to-bottom. Shutdown
                // is first so a SIGTERM stops accepting even if more
                // connections are queued.
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

                    let state = Arc::clone(&state);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // `service_fn` is called once per request on the
                        // connection, not once per connection.
                        let svc = service_fn(move |req| {
                            let state = Arc::clone(&state);
                            async move { dispatch(state, req).await }
                        });

                        // `auto::Builder` handles both HTTP/1.1 and HTTP/2,
                        // whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not
                // grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection before returning.
        while tasks.join_next().await.is_some() {}

        info!("vesper stopped");
        Ok(())
    }
}

struct AppState {
    router: Router,
    expose_errors: bool,
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Hyper-facing entry point: adapts one hyper request and hands it to
/// [`respond`].
///
/// The error type is [`Infallible`] — all failures become responses
/// internally, so hyper never sees an error and no request crashes the
/// process.
async fn dispatch(
    state: Arc<AppState>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, _body) = req.into_parts();
    let request = Request::new(parts.method, &parts.uri, parts.headers);
    let response = respond(&state.router, request, state.expose_errors).await;
    Ok(response.into_http())
}

/// Core hot path: routes one request and produces one response.
///
/// On a table miss the fallback handler runs. The matched handler executes
/// in its own task so a panic is contained there and converted into the
/// 500 payload, with the detail gated on `expose_errors`. Emits the
/// per-request access event either way.
pub(crate) async fn respond(router: &Router, req: Request, expose_errors: bool) -> Response {
    let method = req.method().clone();
    let path = req.path().to_owned();

    let handler = router
        .lookup(&method, &path)
        .or_else(|| router.fallback_handler());

    let response = match handler {
        Some(handler) => match tokio::task::spawn(handler.call(req)).await {
            Ok(response) => response,
            Err(e) => {
                let detail = fault_message(e);
                error!(method = %method, path = %path, "handler fault: {detail}");
                let message = if expose_errors {
                    detail
                } else {
                    GENERIC_FAULT_MESSAGE.to_owned()
                };
                routes::internal_error(message)
            }
        },
        None => Response::status(StatusCode::NOT_FOUND),
    };

    info!(
        method = %method,
        path = %path,
        status = response.status_code().as_u16(),
        "request"
    );
    response
}

/// Extracts a printable message from a failed handler task.
fn fault_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return GENERIC_FAULT_MESSAGE.to_owned();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        GENERIC_FAULT_MESSAGE.to_owned()
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
