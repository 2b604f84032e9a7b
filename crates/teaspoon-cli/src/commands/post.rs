use std::path::Path;

use teaspoon_core::{Attachment, NoteSubmission, SubmitNoteHandler, SubmitOutcome};

use crate::commands::common::{build_client, resolve_note_text, ResolvedSettings};
use crate::error::CliError;
use crate::ui::TerminalUi;

pub async fn run_post(
    note_parts: &[String],
    image: Option<&Path>,
    settings: &ResolvedSettings,
) -> Result<(), CliError> {
    let note = resolve_note_text(note_parts)?;
    let mut submission = NoteSubmission::new(note);
    if let Some(path) = image {
        tracing::debug!(path = %path.display(), "Attaching image");
        submission = submission.with_file(Attachment::from_path(path)?);
    }

    let outcome = submit(submission, settings).await?;
    tracing::debug!(success = outcome.is_success(), ?outcome, "Submission finished");
    outcome_to_result(outcome)
}

pub async fn submit(
    submission: NoteSubmission,
    settings: &ResolvedSettings,
) -> Result<SubmitOutcome, CliError> {
    let client = build_client(settings)?;
    let ui = TerminalUi::new(client.base_url().to_string());
    let handler = SubmitNoteHandler::new(settings.submit.clone(), client, ui);
    Ok(handler.submit(submission).await)
}

pub fn outcome_to_result(outcome: SubmitOutcome) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Navigated(_) => Ok(()),
        SubmitOutcome::Rejected(reason) => Err(CliError::NotPosted(reason.to_string())),
        SubmitOutcome::ServerRejected(status) => Err(CliError::NotPosted(format!(
            "server returned HTTP {status}"
        ))),
        SubmitOutcome::PayloadInvalid(reason) | SubmitOutcome::TransportFailed(reason) => {
            Err(CliError::NotPosted(reason))
        }
        SubmitOutcome::AlreadyInFlight => Err(CliError::NotPosted(
            "another post is still in flight".to_string(),
        )),
    }
}
