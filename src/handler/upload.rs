//! Upload handler
//!
//! Consumes a multipart/form-data body, streams the file field into a
//! staging file, and commits it to the upload slot. Multipart decoding is
//! delegated to multer; this handler never buffers the whole upload in
//! memory.

use super::Handler;
use crate::http::{self, RawRequest, ResponseSink};
use crate::logger;
use crate::storage::UploadSlot;
use async_trait::async_trait;
use std::fmt;
use tokio::io::AsyncWriteExt;

/// Form field carrying the uploaded file.
const FILE_FIELD: &str = "upload";

/// Body of the confirmation page, referencing the served image.
const CONFIRMATION: &str = "received image:<br/><img src='/show' />";

#[derive(Debug)]
pub enum UploadError {
    MissingContentType,
    MissingFileField,
    Parse(multer::Error),
    Io(std::io::Error),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContentType => write!(f, "missing multipart content type"),
            Self::MissingFileField => write!(f, "no '{FILE_FIELD}' file field in form data"),
            Self::Parse(e) => write!(f, "form parsing failed: {e}"),
            Self::Io(e) => write!(f, "saving upload failed: {e}"),
        }
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<multer::Error> for UploadError {
    fn from(e: multer::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub struct UploadHandler {
    slot: UploadSlot,
}

impl UploadHandler {
    pub fn new(slot: UploadSlot) -> Self {
        Self { slot }
    }

    /// Parse the form and persist the file field into the slot.
    ///
    /// The slot commit (rename) completes before this returns, so the
    /// confirmation response is only sent once the file is fully in place.
    async fn receive_upload(&self, request: RawRequest) -> Result<(), UploadError> {
        let boundary = match request.content_type() {
            Some(ct) => multer::parse_boundary(ct)?,
            None => return Err(UploadError::MissingContentType),
        };

        let mut multipart = multer::Multipart::new(request.into_body_stream(), boundary);
        while let Some(mut field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                // Drain non-file fields so parsing can continue.
                while field.chunk().await?.is_some() {}
                continue;
            }

            let staging = self.slot.staging_path();
            if let Err(e) = self.store_field(&mut field, &staging).await {
                // A failed upload must not leave its staging file behind.
                let _ = tokio::fs::remove_file(&staging).await;
                return Err(e);
            }
            return Ok(());
        }

        Err(UploadError::MissingFileField)
    }

    /// Stream one field into the staging file and commit it to the slot.
    async fn store_field(
        &self,
        field: &mut multer::Field<'_>,
        staging: &std::path::Path,
    ) -> Result<(), UploadError> {
        let mut file = tokio::fs::File::create(staging).await?;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);

        self.slot.commit(staging).await?;
        Ok(())
    }
}

#[async_trait]
impl Handler for UploadHandler {
    fn name(&self) -> &'static str {
        "upload"
    }

    async fn handle(&self, sink: ResponseSink, request: RawRequest) {
        match self.receive_upload(request).await {
            Ok(()) => sink.finalize(http::build_html_response(CONFIRMATION.to_string())),
            Err(e) => {
                logger::log_error(&format!("upload failed: {e}"));
                sink.finalize(http::build_500_response(&e.to_string()));
            }
        }
    }
}
