//! Request routing dispatch module
//!
//! Resolves an incoming path against the route table and hands the response
//! sink to the matched handler, or answers 404 itself.

use super::table::RouteTable;
use crate::http::{self, RawRequest, ResponseSink};
use crate::logger;
use std::sync::Arc;

/// Dispatch one request.
///
/// Fire-and-forget: on a hit the handler runs in its own task and control
/// returns immediately; the caller observes the outcome through the sink's
/// receiver, whenever the handler finalizes. On a miss the dispatcher
/// finalizes the sink with the fixed not-found response and no handler runs.
///
/// Exactly one of the matched handler or this miss path finalizes the sink.
pub fn dispatch(table: &RouteTable, path: &str, sink: ResponseSink, request: RawRequest) {
    match table.lookup(path) {
        Some(handler) => {
            logger::log_handler_called(handler.name());
            let handler = Arc::clone(handler);
            tokio::spawn(async move {
                handler.handle(sink, request).await;
            });
        }
        None => {
            logger::log_no_handler(path);
            sink.finalize(http::build_404_response());
        }
    }
}
