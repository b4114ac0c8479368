//! Request handler module
//!
//! One handler per registered path. A handler receives the response sink
//! (and the raw request, if it consumes the body) and finalizes the sink
//! exactly once, possibly from the completion point of a single
//! asynchronous sub-operation.

pub mod command;
pub mod echo;
pub mod pages;
pub mod show;
pub mod upload;

pub use command::CommandHandler;
pub use echo::EchoHandler;
pub use pages::StartHandler;
pub use show::ShowHandler;
pub use upload::UploadHandler;

use crate::http::{RawRequest, ResponseSink};
use crate::routing::{RouteTable, TableError};
use crate::storage::UploadSlot;
use async_trait::async_trait;
use std::sync::Arc;

/// A unit of logic bound to a path.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Short name used in request logs.
    fn name(&self) -> &'static str;

    /// Consume the request and finalize the sink exactly once.
    async fn handle(&self, sink: ResponseSink, request: RawRequest);
}

/// Build the server's fixed route table.
pub fn default_routes(slot: UploadSlot) -> Result<RouteTable, TableError> {
    let start: Arc<dyn Handler> = Arc::new(StartHandler);
    RouteTable::build(vec![
        ("/", Arc::clone(&start)),
        ("/start", start),
        ("/upload", Arc::new(UploadHandler::new(slot.clone()))),
        ("/show", Arc::new(ShowHandler::new(slot))),
    ])
}
