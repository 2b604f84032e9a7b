//! teaspoon-core - Core library for teaspoon
//!
//! This crate holds the note submission flow shared by teaspoon front ends:
//! note validation, multipart upload payloads, the HTTP upload client, and the
//! handler that turns one submission into a redirect or a user-facing alert.

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod payload;
pub mod util;

pub use client::{HttpUploadClient, TransportError, UploadTransport};
pub use config::{ConfigError, SubmitConfig};
pub use error::{Error, Result};
pub use handler::{SubmitNoteHandler, SubmitOutcome, SubmitUi};
pub use models::{Attachment, FeedPost, NoteSubmission, ValidationError, WhoIs};
pub use payload::UploadPayload;
