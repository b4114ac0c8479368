//! Text echo handler
//!
//! Body-consuming handler for urlencoded form posts: collects the request
//! body, parses it, and echoes the submitted `text` field back.

use super::Handler;
use crate::http::{self, RawRequest, ResponseSink};
use async_trait::async_trait;

/// Form field echoed back to the client.
const TEXT_FIELD: &str = "text";

pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn handle(&self, sink: ResponseSink, request: RawRequest) {
        match request.collect_bytes().await {
            Ok(body) => {
                let text = form_urlencoded::parse(&body)
                    .into_owned()
                    .find(|(key, _)| key == TEXT_FIELD)
                    .map(|(_, value)| value)
                    .unwrap_or_default();
                sink.finalize(http::build_text_response(format!(
                    "You've sent the text: {text}"
                )));
            }
            Err(e) => {
                sink.finalize(http::build_500_response(&format!(
                    "reading request body failed: {e}"
                )));
            }
        }
    }
}
