//! Connection handling module
//!
//! Accept loop and per-request bridging into the dispatcher. The listener
//! extracts the request path, creates the response sink and raw request
//! handle, and calls `dispatch`; it never finalizes the sink itself and
//! never reads the request body.

use crate::config::AppState;
use crate::http::{self, RawRequest, ResponseSink};
use crate::logger;
use crate::routing;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections until the listener fails or the task is dropped.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if state.config.logging.access_log {
                    logger::log_connection_accepted(&peer_addr);
                }
                handle_connection(stream, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Serve one connection in a spawned task.
fn handle_connection(stream: tokio::net::TcpStream, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handle_request(req, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Bridge one hyper request into the dispatcher.
///
/// While the dispatched handler awaits its asynchronous sub-operation, this
/// future is parked on the sink's receiver and the accept loop keeps
/// serving other connections; no request blocks another.
async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    if state.config.logging.access_log {
        logger::log_request_received(&path);
    }

    // Header-only size guard; the body itself stays untouched here.
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let (sink, reply) = ResponseSink::new();
    let raw = RawRequest::from_hyper(req);
    routing::dispatch(&state.table, &path, sink, raw);

    match reply.await {
        Ok(response) => {
            if state.config.logging.access_log {
                let bytes = response.body().size_hint().exact().unwrap_or(0);
                logger::log_response(usize::try_from(bytes).unwrap_or(usize::MAX));
            }
            Ok(response)
        }
        // Unreachable in practice: the sink's drop guard always replies.
        Err(_) => Ok(http::build_500_response("response channel closed")),
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}
