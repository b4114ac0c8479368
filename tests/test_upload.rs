//! End-to-end upload scenarios through the full route table and dispatcher.

use http_body_util::BodyExt;
use hyper::body::Bytes;
use hyper::Method;
use uplink::handler::default_routes;
use uplink::http::{RawRequest, ResponseSink};
use uplink::routing::{dispatch, RouteTable};
use uplink::storage::UploadSlot;

const BOUNDARY: &str = "uplink-test-boundary";

fn temp_slot(tag: &str) -> UploadSlot {
    let path = std::env::temp_dir().join(format!("uplink-upload-{}-{tag}.png", std::process::id()));
    UploadSlot::new(path)
}

fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Build a multipart body with one form field.
fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Bytes {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    Bytes::from(body)
}

async fn send(
    table: &RouteTable,
    method: Method,
    path: &str,
    content_type: Option<&str>,
    body: Bytes,
) -> hyper::Response<http_body_util::Full<Bytes>> {
    let (sink, reply) = ResponseSink::new();
    let raw = RawRequest::new(method, path, content_type, body);
    dispatch(table, path, sink, raw);
    reply.await.expect("request must be finalized")
}

async fn body_bytes(response: hyper::Response<http_body_util::Full<Bytes>>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

#[tokio::test]
async fn test_get_start_serves_form_with_file_input() {
    let table = default_routes(temp_slot("form")).unwrap();
    let response = send(&table, Method::GET, "/start", None, Bytes::new()).await;
    assert_eq!(response.status(), 200);

    let body = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(body.contains("type=\"file\""));

    // `/` serves the same form.
    let response = send(&table, Method::GET, "/", None, Bytes::new()).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_get_unknown_path_is_404() {
    let table = default_routes(temp_slot("404")).unwrap();
    let response = send(&table, Method::GET, "/nonexistent", None, Bytes::new()).await;
    assert_eq!(response.status(), 404);
    assert_eq!(&body_bytes(response).await[..], b"404 Not found");
}

#[tokio::test]
async fn test_upload_then_show_roundtrip() {
    let slot = temp_slot("roundtrip");
    let table = default_routes(slot.clone()).unwrap();
    let image = b"\x89PNG\r\n\x1a\n pretend this is a real image";

    let response = send(
        &table,
        Method::POST,
        "/upload",
        Some(&multipart_content_type()),
        multipart_body("upload", Some("cat.png"), image),
    )
    .await;
    assert_eq!(response.status(), 200);

    // Confirmation references the served image, and the slot already holds
    // the bytes by the time the confirmation arrives.
    let body = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(body.contains("received image:"));
    assert!(body.contains("<img src='/show'"));
    assert_eq!(slot.read().await.unwrap(), image);

    let response = send(&table, Method::GET, "/show", None, Bytes::new()).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers().get("Content-Type").unwrap(), "image/png");
    assert_eq!(&body_bytes(response).await[..], image);

    tokio::fs::remove_file(slot.path()).await.unwrap();
}

#[tokio::test]
async fn test_show_before_any_upload_is_500() {
    let table = default_routes(temp_slot("empty")).unwrap();
    let response = send(&table, Method::GET, "/show", None, Bytes::new()).await;
    assert_eq!(response.status(), 500);
    assert!(!body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field_is_500() {
    let slot = temp_slot("nofield");
    let table = default_routes(slot.clone()).unwrap();

    let response = send(
        &table,
        Method::POST,
        "/upload",
        Some(&multipart_content_type()),
        multipart_body("title", None, b"only text"),
    )
    .await;
    assert_eq!(response.status(), 500);

    let body = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(body.contains("upload"));

    // Nothing was committed to the slot.
    assert!(slot.read().await.is_err());
}

#[tokio::test]
async fn test_upload_without_multipart_content_type_is_500() {
    let table = default_routes(temp_slot("badct")).unwrap();
    let response = send(
        &table,
        Method::POST,
        "/upload",
        None,
        Bytes::from_static(b"not a form"),
    )
    .await;
    assert_eq!(response.status(), 500);

    let body = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(body.contains("content type"));
}

#[tokio::test]
async fn test_failed_upload_leaves_no_staging_files() {
    // A slot path that is an existing directory makes the commit rename
    // fail after the staging file is fully written.
    let dir =
        std::env::temp_dir().join(format!("uplink-upload-{}-slotdir.png", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let slot = UploadSlot::new(&dir);
    let table = default_routes(slot).unwrap();

    let response = send(
        &table,
        Method::POST,
        "/upload",
        Some(&multipart_content_type()),
        multipart_body("upload", Some("f.png"), b"doomed"),
    )
    .await;
    assert_eq!(response.status(), 500);

    // The staging file next to the slot must be cleaned up on failure.
    let parent = dir.parent().unwrap();
    let prefix = dir.file_name().unwrap().to_string_lossy().into_owned();
    let mut leftovers = Vec::new();
    let mut entries = tokio::fs::read_dir(parent).await.unwrap();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(&prefix) && name.ends_with(".part") {
            leftovers.push(name);
        }
    }
    assert!(leftovers.is_empty(), "leaked staging files: {leftovers:?}");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn test_upload_overwrites_previous_slot_contents() {
    let slot = temp_slot("overwrite");
    let table = default_routes(slot.clone()).unwrap();

    for payload in [b"first upload".as_slice(), b"second upload".as_slice()] {
        let response = send(
            &table,
            Method::POST,
            "/upload",
            Some(&multipart_content_type()),
            multipart_body("upload", Some("f.png"), payload),
        )
        .await;
        assert_eq!(response.status(), 200);
    }

    assert_eq!(slot.read().await.unwrap(), b"second upload");
    tokio::fs::remove_file(slot.path()).await.unwrap();
}
