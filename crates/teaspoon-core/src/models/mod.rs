//! Data models for teaspoon

mod attachment;
mod feed;
mod note;
mod who;

pub use attachment::{infer_attachment_mime_type, Attachment};
pub use feed::{FeedPost, FeedResponse};
pub use note::{validate_note, NoteSubmission, ValidationError, NOTE_PLACEHOLDER};
pub use who::WhoIs;
