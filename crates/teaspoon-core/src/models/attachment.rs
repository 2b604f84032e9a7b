//! Attachment model

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// An in-memory file picked to accompany a note.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name sent with the multipart part.
    pub file_name: String,
    /// Content MIME type.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    /// Create an attachment from bytes already in memory.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an attachment from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Attachment path has no usable file name: {}",
                    path.display()
                ))
            })?
            .to_string();

        let bytes = std::fs::read(path)?;
        let mime_type = infer_attachment_mime_type(None, &file_name);
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Attachment size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Pick a MIME type, preferring an explicit non-generic content type over the
/// extension guess.
#[must_use]
pub fn infer_attachment_mime_type(content_type: Option<&str>, file_name: &str) -> String {
    if let Some(content_type) = content_type {
        let trimmed = content_type.trim();
        if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("application/octet-stream") {
            return trimmed.to_string();
        }
    }

    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
