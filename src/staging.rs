//! In-memory store of screenshots staged for the next outgoing message.
//!
//! The store owns the staged-image sequence for one compose cycle: from the
//! first stage action until the host's send hook drains it (or an explicit
//! clear). Entries are keyed by file path, never by list position, so staging
//! state stays correct while the picker deletes records around it.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use thiserror::Error;

use crate::scan::ScreenshotRecord;

/// Image type of a staged payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    Png,
    Jpeg,
    Webp,
}

impl MimeType {
    /// Infer the mime type from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// The mime string sent to the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

/// A staged image payload, ready for transport to the host.
///
/// Serializes to the host's wire shape (`{"mimeType": ..., "data": ...}`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedImage {
    /// Mime type string (`image/png`, `image/jpeg`, `image/webp`).
    pub mime_type: &'static str,
    /// Base64-encoded file content.
    pub data: String,
}

/// Errors that can occur when staging a screenshot.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Failed to read screenshot: {0}")]
    Read(#[from] std::io::Error),

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}

/// Process-lifetime set of staged images.
///
/// Single-threaded by design: the host event loop runs every mutation to
/// completion, so no locking is needed. Tests should instantiate their own
/// store rather than sharing one.
#[derive(Debug, Default)]
pub struct StagingStore {
    /// Staged entries in stage order.
    entries: Vec<(PathBuf, StagedImage)>,
}

impl StagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a screenshot: read, encode, and append.
    ///
    /// No-op if the path is already staged.
    pub fn stage(&mut self, record: &ScreenshotRecord) -> Result<(), StageError> {
        if self.is_staged(&record.path) {
            return Ok(());
        }
        let mime = MimeType::from_path(&record.path)
            .ok_or_else(|| StageError::UnsupportedType(record.name.clone()))?;
        let bytes = std::fs::read(&record.path)?;
        let image = StagedImage {
            mime_type: mime.as_str(),
            data: BASE64.encode(&bytes),
        };
        log::debug!("Staged {} ({} bytes)", record.path.display(), bytes.len());
        self.entries.push((record.path.clone(), image));
        Ok(())
    }

    /// Remove the staged entry for a path; no-op if not staged.
    pub fn unstage(&mut self, path: &Path) {
        self.entries.retain(|(p, _)| p != path);
    }

    /// Stage if unstaged, unstage if staged.
    ///
    /// Staging failures are absorbed here: the staging state for the record
    /// is left unchanged and the error is logged.
    pub fn toggle(&mut self, record: &ScreenshotRecord) {
        if self.is_staged(&record.path) {
            self.unstage(&record.path);
        } else if let Err(err) = self.stage(record) {
            log::warn!("Could not stage {}: {err}", record.path.display());
        }
    }

    /// Returns true if the path is currently staged.
    pub fn is_staged(&self, path: &Path) -> bool {
        self.entries.iter().any(|(p, _)| p == path)
    }

    /// Return all staged images in stage order and empty the store.
    pub fn drain(&mut self) -> Vec<StagedImage> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(_, image)| image)
            .collect()
    }

    /// Discard all staged entries without returning them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of currently staged images.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Currently staged paths, in stage order.
    pub fn staged_paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|(p, _)| p.as_path()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::io::Write;
    use tempfile::TempDir;

    fn record_in(dir: &Path, name: &str, content: &[u8]) -> ScreenshotRecord {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        ScreenshotRecord {
            path,
            name: name.to_string(),
            modified: Local::now(),
            size_bytes: content.len() as u64,
        }
    }

    #[test]
    fn stage_encodes_content_and_mime() {
        let temp = TempDir::new().unwrap();
        let record = record_in(temp.path(), "shot.png", b"pngdata");
        let mut store = StagingStore::new();
        store.stage(&record).unwrap();

        let images = store.drain();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/png");
        assert_eq!(images[0].data, BASE64.encode(b"pngdata"));
    }

    #[test]
    fn staged_image_serializes_to_host_wire_shape() {
        let temp = TempDir::new().unwrap();
        let record = record_in(temp.path(), "shot.png", b"pngdata");
        let mut store = StagingStore::new();
        store.stage(&record).unwrap();

        let images = store.drain();
        let json = serde_json::to_value(&images[0]).unwrap();
        assert_eq!(json["mimeType"], "image/png");
        assert_eq!(json["data"], BASE64.encode(b"pngdata"));
    }

    #[test]
    fn stage_is_idempotent_per_path() {
        let temp = TempDir::new().unwrap();
        let record = record_in(temp.path(), "shot.jpg", b"jpg");
        let mut store = StagingStore::new();
        store.stage(&record).unwrap();
        store.stage(&record).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn toggle_round_trips() {
        let temp = TempDir::new().unwrap();
        let record = record_in(temp.path(), "shot.webp", b"webp");
        let mut store = StagingStore::new();
        store.toggle(&record);
        assert_eq!(store.count(), 1);
        assert!(store.is_staged(&record.path));
        store.toggle(&record);
        assert_eq!(store.count(), 0);
        assert!(!store.is_staged(&record.path));
    }

    #[test]
    fn drain_returns_stage_order_and_empties() {
        let temp = TempDir::new().unwrap();
        let a = record_in(temp.path(), "a.png", b"a");
        let b = record_in(temp.path(), "b.png", b"b");
        let mut store = StagingStore::new();
        store.stage(&a).unwrap();
        store.stage(&b).unwrap();
        store.unstage(&a.path);

        let images = store.drain();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].data, BASE64.encode(b"b"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn staging_missing_file_is_an_error_and_leaves_state_unchanged() {
        let temp = TempDir::new().unwrap();
        let record = ScreenshotRecord {
            path: temp.path().join("gone.png"),
            name: "gone.png".to_string(),
            modified: Local::now(),
            size_bytes: 0,
        };
        let mut store = StagingStore::new();
        assert!(store.stage(&record).is_err());
        assert_eq!(store.count(), 0);

        // toggle absorbs the failure
        store.toggle(&record);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let temp = TempDir::new().unwrap();
        let record = record_in(temp.path(), "shot.gif", b"gif");
        let mut store = StagingStore::new();
        assert!(matches!(
            store.stage(&record),
            Err(StageError::UnsupportedType(_))
        ));
    }
}
