//! Multipart body for one note upload.
//!
//! The server reads two form fields: `post`, a JSON document `{"Note": ...}`,
//! and the optional file field `img`.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Attachment, NoteSubmission};

/// Form field holding the JSON-encoded note.
pub const POST_FIELD: &str = "post";
/// Form field holding the optional image.
pub const IMG_FIELD: &str = "img";

/// JSON document carried in the `post` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "Note")]
    pub note: String,
}

/// Everything sent for one submission, built fresh each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    /// Serialized [`PostDocument`].
    pub post: String,
    pub img: Option<Attachment>,
}

impl UploadPayload {
    /// Serialize the note and keep the first selected file, if any.
    ///
    /// Fails with [`Error::InvalidInput`] when the file's MIME type could not
    /// be sent as a part header, so a bad attachment is caught before any
    /// request is made.
    pub fn from_submission(submission: NoteSubmission) -> Result<Self> {
        let (note, img) = submission.into_parts();
        if let Some(img) = &img {
            Part::bytes(Vec::<u8>::new()).mime_str(&img.mime_type).map_err(|_| {
                Error::InvalidInput(format!(
                    "attachment {} has an invalid MIME type '{}'",
                    img.file_name, img.mime_type
                ))
            })?;
        }
        let post = serde_json::to_string(&PostDocument { note })?;
        Ok(Self { post, img })
    }

    pub const fn has_attachment(&self) -> bool {
        self.img.is_some()
    }

    /// Short description used in request logs.
    pub fn summary(&self) -> String {
        match &self.img {
            Some(img) => format!(
                "post={}B img={} ({}, {}B)",
                self.post.len(),
                img.file_name,
                img.mime_type,
                img.size_bytes()
            ),
            None => format!("post={}B no img", self.post.len()),
        }
    }

    /// Build the multipart form. The `img` part is omitted entirely when no file
    /// was selected.
    pub fn into_form(self) -> Result<Form> {
        let form = Form::new().text(POST_FIELD, self.post);
        let Some(img) = self.img else {
            return Ok(form);
        };

        let part = Part::bytes(img.bytes)
            .file_name(img.file_name)
            .mime_str(&img.mime_type)?;
        Ok(form.part(IMG_FIELD, part))
    }
}
