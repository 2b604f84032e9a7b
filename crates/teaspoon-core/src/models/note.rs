//! Note text validation and the submission input

use thiserror::Error;

use super::attachment::Attachment;

/// Prompt text the note field shows before the user types anything.
pub const NOTE_PLACEHOLDER: &str = "enter a note here";

/// Why a note was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing was entered
    #[error("note is empty")]
    Empty,
    /// The field still holds its placeholder prompt
    #[error("note still contains the placeholder text")]
    Placeholder,
}

/// Check whether a note may be posted.
///
/// The empty string is refused as [`ValidationError::Empty`]; text whose
/// trimmed form equals [`NOTE_PLACEHOLDER`] is refused as
/// [`ValidationError::Placeholder`]. Only the placeholder comparison trims, so a
/// whitespace-only note is accepted. Nothing else is checked: no length limit,
/// no sanitization.
///
/// # Examples
///
/// ```
/// use teaspoon_core::models::{validate_note, ValidationError};
///
/// assert_eq!(validate_note(""), Err(ValidationError::Empty));
/// assert_eq!(validate_note("  enter a note here "), Err(ValidationError::Placeholder));
/// assert!(validate_note("tea is ready").is_ok());
/// ```
pub fn validate_note(note: &str) -> Result<(), ValidationError> {
    if note.is_empty() {
        return Err(ValidationError::Empty);
    }
    if note.trim() == NOTE_PLACEHOLDER {
        return Err(ValidationError::Placeholder);
    }
    Ok(())
}

/// Everything one submission reads from its front end.
///
/// `files` mirrors a file picker: it may hold any number of entries, but only
/// the first one is uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSubmission {
    pub note: String,
    pub files: Vec<Attachment>,
}

impl NoteSubmission {
    /// Create a submission with note text and no files.
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            files: Vec::new(),
        }
    }

    /// Add one selected file.
    #[must_use]
    pub fn with_file(mut self, attachment: Attachment) -> Self {
        self.files.push(attachment);
        self
    }

    /// The file that will be uploaded, if any was selected.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.files.first()
    }

    /// Consume the submission, keeping the note and the first file only.
    pub fn into_parts(self) -> (String, Option<Attachment>) {
        let attachment = self.files.into_iter().next();
        (self.note, attachment)
    }
}
