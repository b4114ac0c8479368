//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension, covering
//! the types this server actually emits (the upload form, plain-text bodies,
//! and served images).

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use uplink::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(get_content_type(Some("png")), "image/png");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",

        // Default
        _ => "application/octet-stream",
    }
}
