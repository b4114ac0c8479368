//! Static page handlers
//!
//! Serves the upload form at `/` and `/start`. Content is fixed, so the
//! sink is finalized synchronously.

use super::Handler;
use crate::http::{self, RawRequest, ResponseSink};
use async_trait::async_trait;

/// HTML form posting a file field named "upload" to `/upload`.
pub const UPLOAD_FORM: &str = "<html>\
<head>\
<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\
</head>\
<body>\
<form action=\"/upload\" enctype=\"multipart/form-data\" method=\"post\">\
<input type=\"file\" name=\"upload\" multiple=\"multiple\">\
<input type=\"submit\" value=\"Upload file\" />\
</form>\
</body>\
</html>";

pub struct StartHandler;

#[async_trait]
impl Handler for StartHandler {
    fn name(&self) -> &'static str {
        "start"
    }

    async fn handle(&self, sink: ResponseSink, _request: RawRequest) {
        sink.finalize(http::build_html_response(UPLOAD_FORM.to_string()));
    }
}
