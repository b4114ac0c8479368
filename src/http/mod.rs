//! HTTP protocol layer module
//!
//! Response builders, MIME lookup, and the per-request sink/raw-request
//! types, decoupled from specific handler logic.

pub mod mime;
pub mod response;
pub mod sink;

// Re-export commonly used types
pub use response::{
    build_404_response, build_413_response, build_500_response, build_bytes_response,
    build_html_response, build_text_response,
};
pub use sink::{BodyError, RawRequest, RequestBodyStream, ResponseSink};
