//! Show handler
//!
//! Serves the current contents of the upload slot.

use super::Handler;
use crate::http::{self, RawRequest, ResponseSink};
use crate::storage::UploadSlot;
use async_trait::async_trait;
use hyper::body::Bytes;

pub struct ShowHandler {
    slot: UploadSlot,
}

impl ShowHandler {
    pub fn new(slot: UploadSlot) -> Self {
        Self { slot }
    }
}

#[async_trait]
impl Handler for ShowHandler {
    fn name(&self) -> &'static str {
        "show"
    }

    async fn handle(&self, sink: ResponseSink, _request: RawRequest) {
        // The sink is only touched once the read has concluded; the body is
        // either the file's bytes or the read error, never a default.
        match self.slot.read().await {
            Ok(bytes) => sink.finalize(http::build_bytes_response(
                Bytes::from(bytes),
                self.slot.content_type(),
            )),
            Err(e) => sink.finalize(http::build_500_response(&e.to_string())),
        }
    }
}
