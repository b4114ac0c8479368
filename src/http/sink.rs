//! Response sink and raw request types
//!
//! `ResponseSink` is the one-shot writable target for a single request's
//! reply: finalizing consumes the sink, so a second finalize is not
//! representable, and dropping an unfinalized sink produces a 500 so no
//! request is ever left without a reply.
//!
//! `RawRequest` carries the request line data plus the body as a byte
//! stream, so body-consuming handlers can parse uploads without the listener
//! ever buffering them.

use crate::http::response;
use crate::logger;
use futures_util::stream;
use futures_util::{Stream, StreamExt};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response};
use std::pin::Pin;
use tokio::sync::oneshot;

/// Error type produced by request body streams.
pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed stream of request body chunks.
pub type RequestBodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, BodyError>> + Send>>;

/// One-shot reply target for a single request.
///
/// Created by the connection layer together with a receiver; exactly one of
/// the matched handler or the dispatcher's not-found path calls
/// [`finalize`](Self::finalize), which consumes the sink and delivers the
/// response to the waiting connection.
pub struct ResponseSink {
    tx: Option<oneshot::Sender<Response<Full<Bytes>>>>,
}

impl ResponseSink {
    /// Create a sink and the receiver the connection awaits the reply on.
    pub fn new() -> (Self, oneshot::Receiver<Response<Full<Bytes>>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Complete the reply with `response`. Consumes the sink.
    ///
    /// If the client has already gone away the response is discarded.
    pub fn finalize(mut self, response: Response<Full<Bytes>>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(response);
        }
    }
}

impl Drop for ResponseSink {
    fn drop(&mut self) {
        // A handler that returns without finalizing (or panics) must still
        // produce a reply; surface it as a server error.
        if let Some(tx) = self.tx.take() {
            logger::log_error("response sink dropped without being finalized");
            let _ = tx.send(response::build_500_response(
                "handler completed without a response",
            ));
        }
    }
}

/// Incoming request handle passed to handlers.
///
/// The body is exposed as a stream; handlers that need it consume the
/// request, everything else ignores it.
pub struct RawRequest {
    method: Method,
    path: String,
    content_type: Option<String>,
    body: RequestBodyStream,
}

impl RawRequest {
    /// Wrap a hyper request without touching its body.
    pub fn from_hyper(req: Request<Incoming>) -> Self {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let content_type = req
            .headers()
            .get(hyper::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body = http_body_util::BodyStream::new(req.into_body()).filter_map(|frame| {
            futures_util::future::ready(match frame {
                Ok(frame) => frame.into_data().ok().map(Ok),
                Err(e) => Some(Err(Box::new(e) as BodyError)),
            })
        });

        Self {
            method,
            path,
            content_type,
            body: Box::pin(body),
        }
    }

    /// Build a request from already-materialized bytes (callers without a
    /// live connection, e.g. tests).
    pub fn new(method: Method, path: &str, content_type: Option<&str>, body: Bytes) -> Self {
        Self {
            method,
            path: path.to_string(),
            content_type: content_type.map(ToString::to_string),
            body: Box::pin(stream::iter(std::iter::once(Ok(body)))),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Consume the request, yielding the body as a chunk stream.
    pub fn into_body_stream(self) -> RequestBodyStream {
        self.body
    }

    /// Consume the request, buffering the full body.
    pub async fn collect_bytes(mut self) -> Result<Bytes, BodyError> {
        let mut buf = Vec::new();
        while let Some(chunk) = self.body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_finalize_delivers_response() {
        let (sink, rx) = ResponseSink::new();
        sink.finalize(response::build_text_response("done".to_string()));
        let resp = rx.await.expect("reply should arrive");
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_dropped_sink_yields_500() {
        let (sink, rx) = ResponseSink::new();
        drop(sink);
        let resp = rx.await.expect("drop guard should reply");
        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn test_collect_bytes_roundtrip() {
        let raw = RawRequest::new(Method::POST, "/echo", None, Bytes::from_static(b"text=hi"));
        assert_eq!(raw.path(), "/echo");
        let body = raw.collect_bytes().await.expect("body should collect");
        assert_eq!(&body[..], b"text=hi");
    }
}
