//! Upload slot module
//!
//! The server persists exactly one uploaded file at a fixed path, overwritten
//! on each successful upload.

use crate::http::mime;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// The process-wide single-slot upload destination.
///
/// Concurrency policy is last-writer-wins: every upload streams into its own
/// staging file (unique name, same directory) and commits with one atomic
/// rename. Concurrent uploads never see each other's partial writes; whichever
/// rename lands last owns the slot.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    path: PathBuf,
}

impl UploadSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Allocate a unique staging path next to the slot.
    ///
    /// Same directory as the slot so the commit rename never crosses a
    /// filesystem boundary.
    pub fn staging_path(&self) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}.{seq}.part", std::process::id()));
        PathBuf::from(name)
    }

    /// Atomically move a fully-written staging file into the slot.
    pub async fn commit(&self, staging: &Path) -> std::io::Result<()> {
        tokio::fs::rename(staging, &self.path).await
    }

    /// Read the slot's current contents.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    /// Content type of the slot, from its file extension.
    pub fn content_type(&self) -> &'static str {
        mime::get_content_type(self.path.extension().and_then(|e| e.to_str()))
    }
}
