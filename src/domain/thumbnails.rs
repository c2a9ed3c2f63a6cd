use std::io;

use bytes::Bytes;
use tempfile::TempPath;
use thiserror::Error;

/// Fallback media type for parts that did not declare one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Media types with a fixed on-disk extension.
const KNOWN_MEDIA_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
];

/// Contents of an uploaded part.
///
/// Small parts stay in memory. Larger ones are spooled to a temporary file
/// that is removed when the value is dropped.
#[derive(Debug)]
pub enum ThumbnailData {
    Memory(Bytes),
    Spooled { path: TempPath, size: u64 },
}

impl ThumbnailData {
    pub fn size(&self) -> u64 {
        match self {
            Self::Memory(bytes) => bytes.len() as u64,
            Self::Spooled { size, .. } => *size,
        }
    }

    /// Load the whole payload into memory.
    pub async fn into_bytes(self) -> io::Result<Bytes> {
        match self {
            Self::Memory(bytes) => Ok(bytes),
            Self::Spooled { path, .. } => tokio::fs::read(&path).await.map(Bytes::from),
        }
    }
}

impl From<Bytes> for ThumbnailData {
    fn from(bytes: Bytes) -> Self {
        Self::Memory(bytes)
    }
}

/// The `thumbnail` part of an upload form.
#[derive(Debug)]
pub struct ThumbnailUpload {
    pub data: ThumbnailData,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl ThumbnailUpload {
    /// Declared media type without parameters, e.g. `image/png; q=1` becomes `image/png`.
    pub fn media_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(normalize_media_type)
            .filter(|value| !value.is_empty())
    }

    /// Extension (with the leading dot) used when the thumbnail is written to disk.
    ///
    /// Known image types win; otherwise the uploaded filename's extension is used.
    pub fn file_extension(&self) -> Option<String> {
        if let Some(ext) = self.media_type().and_then(extension_for_media_type) {
            return Some(ext.to_string());
        }
        self.file_name
            .as_deref()
            .and_then(extension_from_file_name)
            .map(str::to_string)
    }
}

/// A thumbnail held in process memory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredThumbnail {
    pub data: Bytes,
    pub media_type: String,
}

#[derive(Debug, Error)]
pub enum ThumbnailStoreError {
    #[error("unsupported file type")]
    UnsupportedType,
    #[error("thumbnail storage failed: {0}")]
    Io(#[from] std::io::Error),
}

fn normalize_media_type(value: &str) -> &str {
    value.split(';').next().map_or(value, str::trim)
}

pub fn extension_for_media_type(media_type: &str) -> Option<&'static str> {
    let media_type = normalize_media_type(media_type);
    KNOWN_MEDIA_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(media_type))
        .map(|(_, ext)| *ext)
}

/// Extension of the final path component, including the dot.
///
/// Only ASCII alphanumeric extensions are accepted so the result is always a
/// safe filename suffix.
pub fn extension_from_file_name(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let dot = base.rfind('.')?;
    let ext = &base[dot..];
    let valid = ext.len() > 1 && ext[1..].chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(ext)
}
