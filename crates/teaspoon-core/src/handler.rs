//! The note submit flow.
//!
//! [`SubmitNoteHandler::submit`] takes one [`NoteSubmission`], validates it,
//! uploads it, and ends in exactly one of: an alert, a navigation, or nothing
//! at all when another submission is still outstanding.
//!
//! ```text
//! Idle -> Validating -> Invalid -> alert
//!                    -> Building -> bad file -> alert
//!                                -> Sending -> 200   -> navigate
//!                                           -> other -> alert
//!                                           -> error -> alert
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::client::{TransportError, UploadTransport};
use crate::config::SubmitConfig;
use crate::models::{validate_note, NoteSubmission, ValidationError};
use crate::payload::UploadPayload;

/// Shown when the note is empty or still the placeholder.
pub const EMPTY_NOTE_ALERT: &str = "cannot post an empty note!!";
/// Shown when the server answers with anything but 200. Kept verbatim for
/// existing users of the web page.
pub const UPLOAD_FAILED_ALERT: &str = "there was an issue uploading, try agian";
/// Shown when no response arrived at all.
pub const NETWORK_ERROR_ALERT: &str = "could not reach the server, try again";
/// Shown when the selected file cannot be packed into the upload.
pub const INVALID_ATTACHMENT_ALERT: &str = "could not attach that file, pick another one";

/// Front-end effects the handler can trigger.
pub trait SubmitUi {
    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Leave the current view for `target`.
    fn navigate(&self, target: &str);

    /// Called with `true` before a request goes out and `false` once it settles
    /// (or the submission is dropped), so the trigger can be disabled meanwhile.
    fn set_busy(&self, _busy: bool) {}
}

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Refused locally; no request was made.
    Rejected(ValidationError),
    /// The upload body could not be built; no request was made.
    PayloadInvalid(String),
    /// Server accepted the note; the UI was sent to this target.
    Navigated(String),
    /// Server answered with a status other than 200.
    ServerRejected(u16),
    /// The request produced no response.
    TransportFailed(String),
    /// Another submission was still outstanding; nothing happened.
    AlreadyInFlight,
}

impl SubmitOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Navigated(_))
    }
}

/// Runs note submissions against one transport and one front end.
///
/// At most one submission is outstanding at a time; see
/// [`SubmitOutcome::AlreadyInFlight`].
pub struct SubmitNoteHandler<T, U> {
    config: SubmitConfig,
    transport: T,
    ui: U,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Re-enables the front end once the request settles or is abandoned.
struct BusyGuard<'a, U: SubmitUi> {
    ui: &'a U,
}

impl<'a, U: SubmitUi> BusyGuard<'a, U> {
    fn enter(ui: &'a U) -> Self {
        ui.set_busy(true);
        Self { ui }
    }
}

impl<U: SubmitUi> Drop for BusyGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.set_busy(false);
    }
}

impl<T, U> SubmitNoteHandler<T, U>
where
    T: UploadTransport,
    U: SubmitUi,
{
    pub const fn new(config: SubmitConfig, transport: T, ui: U) -> Self {
        Self {
            config,
            transport,
            ui,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently waiting on the server.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, submission: NoteSubmission) -> SubmitOutcome {
        tracing::info!("Submit note requested");
        tracing::debug!(note = %submission.note, "Read note");

        if let Err(reason) = validate_note(&submission.note) {
            tracing::warn!(%reason, "Refusing to post note");
            self.ui.alert(EMPTY_NOTE_ALERT);
            return SubmitOutcome::Rejected(reason);
        }

        let Some(_guard) = self.try_begin() else {
            tracing::warn!("Submission already in flight; ignoring");
            return SubmitOutcome::AlreadyInFlight;
        };

        let payload = match UploadPayload::from_submission(submission) {
            Ok(payload) => payload,
            Err(error) => return self.payload_invalid(&error),
        };
        tracing::debug!(attachment = payload.has_attachment(), "Built upload payload");
        tracing::info!(
            path = %self.config.upload_path,
            "Posting note: {}",
            payload.summary()
        );

        let busy = BusyGuard::enter(&self.ui);
        let result = self
            .transport
            .send_upload(&self.config.upload_path, payload)
            .await;
        drop(busy);
        tracing::info!("Upload finished");

        match result {
            Ok(200) => {
                tracing::info!(redirect = %self.config.success_redirect, "Note posted");
                self.ui.navigate(&self.config.success_redirect);
                SubmitOutcome::Navigated(self.config.success_redirect.clone())
            }
            Ok(status) => {
                tracing::warn!(status, "Server rejected upload");
                self.ui.alert(UPLOAD_FAILED_ALERT);
                SubmitOutcome::ServerRejected(status)
            }
            Err(error @ TransportError::Payload(_)) => self.payload_invalid(&error),
            Err(error) => {
                tracing::error!("Upload failed: {}", error);
                self.ui.alert(NETWORK_ERROR_ALERT);
                SubmitOutcome::TransportFailed(error.to_string())
            }
        }
    }

    fn payload_invalid(&self, error: &dyn std::error::Error) -> SubmitOutcome {
        tracing::error!("Failed to build upload payload: {}", error);
        self.ui.alert(INVALID_ATTACHMENT_ALERT);
        SubmitOutcome::PayloadInvalid(error.to_string())
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::Attachment;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum UiEvent {
        Alert(String),
        Navigate(String),
        Busy(bool),
    }

    #[derive(Default)]
    struct RecordingUi {
        events: Mutex<Vec<UiEvent>>,
    }

    impl RecordingUi {
        fn events(&self) -> Vec<UiEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SubmitUi for RecordingUi {
        fn alert(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(UiEvent::Alert(message.to_string()));
        }

        fn navigate(&self, target: &str) {
            self.events
                .lock()
                .unwrap()
                .push(UiEvent::Navigate(target.to_string()));
        }

        fn set_busy(&self, busy: bool) {
            self.events.lock().unwrap().push(UiEvent::Busy(busy));
        }
    }

    enum Reply {
        Status(u16),
        Unreachable,
    }

    struct StubTransport {
        reply: Reply,
        sent: Mutex<Vec<(String, UploadPayload)>>,
    }

    impl StubTransport {
        fn status(status: u16) -> Self {
            Self {
                reply: Reply::Status(status),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: Reply::Unreachable,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(String, UploadPayload)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl UploadTransport for StubTransport {
        async fn send_upload(
            &self,
            path: &str,
            payload: UploadPayload,
        ) -> Result<u16, TransportError> {
            self.sent.lock().unwrap().push((path.to_string(), payload));
            match self.reply {
                Reply::Status(status) => Ok(status),
                Reply::Unreachable => Err(unreachable_error()),
            }
        }
    }

    fn unreachable_error() -> TransportError {
        let error = reqwest::Client::new()
            .post("not a url")
            .build()
            .unwrap_err();
        TransportError::Request(error)
    }

    fn handler(transport: StubTransport) -> SubmitNoteHandler<StubTransport, RecordingUi> {
        SubmitNoteHandler::new(SubmitConfig::default(), transport, RecordingUi::default())
    }

    #[tokio::test]
    async fn empty_and_placeholder_notes_never_reach_the_network() {
        for note in ["", "enter a note here", "  enter a note here\n"] {
            let handler = handler(StubTransport::status(200));
            let outcome = handler.submit(NoteSubmission::new(note)).await;

            assert!(matches!(outcome, SubmitOutcome::Rejected(_)), "{note:?}");
            assert!(handler.transport.sent().is_empty());
            assert_eq!(
                handler.ui.events(),
                vec![UiEvent::Alert(EMPTY_NOTE_ALERT.to_string())]
            );
        }
    }

    #[tokio::test]
    async fn whitespace_only_note_is_posted_verbatim() {
        let handler = handler(StubTransport::status(200));
        let outcome = handler.submit(NoteSubmission::new("   ")).await;

        assert_eq!(outcome, SubmitOutcome::Navigated("/feed.html".to_string()));
        assert_eq!(handler.transport.sent()[0].1.post, r#"{"Note":"   "}"#);
    }

    #[tokio::test]
    async fn success_navigates_without_alert() {
        let handler = handler(StubTransport::status(200));
        let outcome = handler.submit(NoteSubmission::new("hello")).await;

        assert_eq!(outcome, SubmitOutcome::Navigated("/feed.html".to_string()));
        assert!(outcome.is_success());
        assert_eq!(
            handler.ui.events(),
            vec![
                UiEvent::Busy(true),
                UiEvent::Busy(false),
                UiEvent::Navigate("/feed.html".to_string()),
            ]
        );

        let sent = handler.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "/upload");
        assert_eq!(sent[0].1.post, r#"{"Note":"hello"}"#);
        assert!(sent[0].1.img.is_none());
    }

    #[tokio::test]
    async fn non_200_statuses_alert_without_navigation() {
        for status in [201, 204, 400, 404, 500, 503] {
            let handler = handler(StubTransport::status(status));
            let outcome = handler.submit(NoteSubmission::new("hello")).await;

            assert_eq!(outcome, SubmitOutcome::ServerRejected(status));
            let events = handler.ui.events();
            assert!(events.contains(&UiEvent::Alert(UPLOAD_FAILED_ALERT.to_string())));
            assert!(!events.iter().any(|event| matches!(event, UiEvent::Navigate(_))));
        }
    }

    #[tokio::test]
    async fn transport_failure_shows_network_alert() {
        let handler = handler(StubTransport::unreachable());
        let outcome = handler.submit(NoteSubmission::new("hello")).await;

        assert!(matches!(outcome, SubmitOutcome::TransportFailed(_)));
        assert_eq!(
            handler.ui.events().last(),
            Some(&UiEvent::Alert(NETWORK_ERROR_ALERT.to_string()))
        );
        assert!(!handler.is_submitting());
    }

    #[tokio::test]
    async fn unusable_attachment_alerts_before_going_busy() {
        let handler = handler(StubTransport::status(200));
        let submission = NoteSubmission::new("look")
            .with_file(Attachment::new("a.png", "not a mime type\n", vec![1]));
        let outcome = handler.submit(submission).await;

        assert!(matches!(outcome, SubmitOutcome::PayloadInvalid(_)), "{outcome:?}");
        assert!(handler.transport.sent().is_empty());
        assert_eq!(
            handler.ui.events(),
            vec![UiEvent::Alert(INVALID_ATTACHMENT_ALERT.to_string())]
        );
        assert!(!handler.is_submitting());
    }

    #[tokio::test]
    async fn transport_payload_error_uses_attachment_alert() {
        struct BrokenBody;

        impl UploadTransport for BrokenBody {
            async fn send_upload(
                &self,
                _path: &str,
                _payload: UploadPayload,
            ) -> Result<u16, TransportError> {
                Err(TransportError::Payload("bad part".to_string()))
            }
        }

        let handler =
            SubmitNoteHandler::new(SubmitConfig::default(), BrokenBody, RecordingUi::default());
        let outcome = handler.submit(NoteSubmission::new("hello")).await;

        assert!(matches!(outcome, SubmitOutcome::PayloadInvalid(_)));
        assert_eq!(
            handler.ui.events(),
            vec![
                UiEvent::Busy(true),
                UiEvent::Busy(false),
                UiEvent::Alert(INVALID_ATTACHMENT_ALERT.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn first_file_is_attached() {
        let handler = handler(StubTransport::status(200));
        let submission = NoteSubmission::new("look")
            .with_file(Attachment::new("a.png", "image/png", vec![1]))
            .with_file(Attachment::new("b.png", "image/png", vec![2]));
        handler.submit(submission).await;

        let sent = handler.transport.sent();
        assert_eq!(sent[0].1.img.as_ref().unwrap().file_name, "a.png");
    }

    #[tokio::test]
    async fn configured_paths_are_used() {
        let config = SubmitConfig {
            upload_path: "/api/notes".to_string(),
            success_redirect: "/".to_string(),
            ..SubmitConfig::default()
        };
        let handler =
            SubmitNoteHandler::new(config, StubTransport::status(200), RecordingUi::default());
        let outcome = handler.submit(NoteSubmission::new("hello")).await;

        assert_eq!(outcome, SubmitOutcome::Navigated("/".to_string()));
        assert_eq!(handler.transport.sent()[0].0, "/api/notes");
    }

    struct GatedTransport {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    impl UploadTransport for GatedTransport {
        async fn send_upload(
            &self,
            _path: &str,
            _payload: UploadPayload,
        ) -> Result<u16, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(200)
        }
    }

    #[tokio::test]
    async fn duplicate_submission_while_in_flight_is_ignored() {
        let transport = GatedTransport {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        };
        let handler =
            SubmitNoteHandler::new(SubmitConfig::default(), transport, RecordingUi::default());

        let (first, second) = tokio::join!(handler.submit(NoteSubmission::new("one")), async {
            handler.transport.entered.notified().await;
            assert!(handler.is_submitting());
            let outcome = handler.submit(NoteSubmission::new("two")).await;
            handler.transport.release.notify_one();
            outcome
        });

        assert_eq!(first, SubmitOutcome::Navigated("/feed.html".to_string()));
        assert_eq!(second, SubmitOutcome::AlreadyInFlight);
        assert_eq!(handler.transport.calls.load(Ordering::SeqCst), 1);
        assert!(!handler.is_submitting());
        let navigations = handler
            .ui
            .events()
            .into_iter()
            .filter(|event| matches!(event, UiEvent::Navigate(_)))
            .count();
        assert_eq!(navigations, 1);
    }

    #[tokio::test]
    async fn dropping_a_pending_submit_clears_busy_and_in_flight() {
        let transport = GatedTransport {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        };
        let handler =
            SubmitNoteHandler::new(SubmitConfig::default(), transport, RecordingUi::default());

        tokio::select! {
            _ = handler.submit(NoteSubmission::new("abandoned")) => {
                panic!("submit finished without being released");
            }
            () = handler.transport.entered.notified() => {}
        }

        assert!(!handler.is_submitting());
        assert_eq!(
            handler.ui.events(),
            vec![UiEvent::Busy(true), UiEvent::Busy(false)]
        );

        handler.transport.release.notify_one();
        let outcome = handler.submit(NoteSubmission::new("again")).await;
        assert_eq!(outcome, SubmitOutcome::Navigated("/feed.html".to_string()));
    }
}
