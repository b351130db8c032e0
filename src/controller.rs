//! Page controller
//!
//! Drives the page from three events: page-ready (load the TFTP file list
//! into the config selector) and the start/stop button clicks (post to the
//! backend and show the reply in the status line). The controller never looks
//! widgets up itself; the page hands it a [`Bindings`] set at construction.

use crate::backend::{Backend, BackendResult};
use crate::constants::*;
use crate::types::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The single status region of the page
pub trait StatusLine: Send + Sync {
    fn show(&self, status: &StatusMessage);
}

/// The config-filename selector
pub trait FileSelector: Send + Sync {
    fn append_option(&self, filename: &str);
}

/// The server configuration form
pub trait ServerForm: Send + Sync {
    /// Current field values, read at submit time
    fn snapshot(&self) -> FormPayload;
}

/// A button that can be switched off while its request is in flight
pub trait ActionButton: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

/// Handles to the five page elements the controller works with
#[derive(Clone)]
pub struct Bindings {
    pub server_form: Arc<dyn ServerForm>,
    pub start_servers: Arc<dyn ActionButton>,
    pub stop_servers: Arc<dyn ActionButton>,
    pub status: Arc<dyn StatusLine>,
    pub config_filename: Arc<dyn FileSelector>,
}

/// What became of a button click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The request settled and this status was shown
    Rendered(StatusMessage),
    /// The same action was already pending
    Ignored,
}

struct ActionSlot {
    action: ServerAction,
    phase: Mutex<ActionPhase>,
    button: Arc<dyn ActionButton>,
}

impl ActionSlot {
    fn new(action: ServerAction, button: Arc<dyn ActionButton>) -> Self {
        Self {
            action,
            phase: Mutex::new(ActionPhase::Idle),
            button,
        }
    }

    /// Move to `Pending` unless already there. The returned guard settles the
    /// slot when dropped, so the button comes back even if the task unwinds.
    fn begin(&self) -> Option<InFlight<'_>> {
        {
            let mut phase = self.phase.lock();
            if *phase == ActionPhase::Pending {
                return None;
            }
            *phase = ActionPhase::Pending;
        }
        self.button.set_enabled(false);
        Some(InFlight { slot: self })
    }

    fn phase(&self) -> ActionPhase {
        *self.phase.lock()
    }
}

struct InFlight<'a> {
    slot: &'a ActionSlot,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.slot.phase.lock() = ActionPhase::Settled;
        self.slot.button.set_enabled(true);
    }
}

pub struct Controller {
    backend: Arc<dyn Backend>,
    form: Arc<dyn ServerForm>,
    status: Arc<dyn StatusLine>,
    config_select: Arc<dyn FileSelector>,
    start: ActionSlot,
    stop: ActionSlot,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>, bindings: Bindings) -> Self {
        Self {
            backend,
            form: bindings.server_form,
            status: bindings.status,
            config_select: bindings.config_filename,
            start: ActionSlot::new(ServerAction::Start, bindings.start_servers),
            stop: ActionSlot::new(ServerAction::Stop, bindings.stop_servers),
        }
    }

    /// Page-ready handler: fill the config selector from the backend.
    pub async fn initialize(&self) {
        match self.backend.list_tftp_files().await {
            Ok(files) => {
                info!(count = files.len(), "TFTP files loaded");
                for file in &files {
                    self.config_select.append_option(file);
                }
            }
            Err(e) => {
                error!(error = %e, "Error fetching TFTP files");
                self.status.show(&StatusMessage::error(FILE_LIST_ERROR_MESSAGE));
            }
        }
    }

    /// Start-button handler: submit the form to `/start_servers`.
    pub async fn start(&self) -> Dispatch {
        let Some(_in_flight) = self.start.begin() else {
            debug!("Start already pending, click ignored");
            return Dispatch::Ignored;
        };
        let form = self.form.snapshot();
        info!(
            fields = form.len(),
            config = form.get(FIELD_CONFIG_FILENAME).unwrap_or("-"),
            "Requesting server start"
        );
        let result = self.backend.start_servers(&form).await;
        Dispatch::Rendered(self.render(self.start.action, result))
    }

    /// Stop-button handler: bare POST to `/stop_servers`.
    pub async fn stop(&self) -> Dispatch {
        let Some(_in_flight) = self.stop.begin() else {
            debug!("Stop already pending, click ignored");
            return Dispatch::Ignored;
        };
        info!("Requesting server stop");
        let result = self.backend.stop_servers().await;
        Dispatch::Rendered(self.render(self.stop.action, result))
    }

    pub fn phase(&self, action: ServerAction) -> ActionPhase {
        match action {
            ServerAction::Start => self.start.phase(),
            ServerAction::Stop => self.stop.phase(),
        }
    }

    fn render(&self, action: ServerAction, result: BackendResult<ActionOutcome>) -> StatusMessage {
        let status = match result {
            Ok(outcome) => {
                let message = outcome.message();
                match &outcome {
                    ActionOutcome::Success(_) => {
                        info!(action = action.label(), reply = message, "Backend reported success")
                    }
                    ActionOutcome::Failure(_) => {
                        warn!(action = action.label(), reply = message, "Backend reported failure")
                    }
                }
                outcome.into_status()
            }
            Err(e) => {
                error!(action = action.label(), endpoint = action.endpoint(), error = %e, "Request failed");
                StatusMessage::error(GENERIC_ERROR_MESSAGE)
            }
        };
        self.status.show(&status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, HttpBackend};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn decode_error() -> BackendError {
        BackendError::Decode(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err())
    }

    /// Backend with canned replies. Stop waits on `gate` when one is set.
    #[derive(Default)]
    struct FakeBackend {
        files: Option<Vec<String>>,
        start_reply: Option<ActionOutcome>,
        stop_reply: Option<ActionOutcome>,
        gate: Option<Arc<Notify>>,
        submitted: Mutex<Vec<FormPayload>>,
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn list_tftp_files(&self) -> BackendResult<Vec<String>> {
            self.files.clone().ok_or_else(decode_error)
        }

        async fn start_servers(&self, form: &FormPayload) -> BackendResult<ActionOutcome> {
            self.submitted.lock().push(form.clone());
            self.start_reply.clone().ok_or_else(decode_error)
        }

        async fn stop_servers(&self) -> BackendResult<ActionOutcome> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.stop_reply.clone().ok_or_else(decode_error)
        }
    }

    #[derive(Default)]
    struct RecordingPage {
        options: Mutex<Vec<String>>,
        status: Mutex<Option<StatusMessage>>,
        form: Mutex<FormPayload>,
    }

    impl StatusLine for RecordingPage {
        fn show(&self, status: &StatusMessage) {
            *self.status.lock() = Some(status.clone());
        }
    }

    impl FileSelector for RecordingPage {
        fn append_option(&self, filename: &str) {
            self.options.lock().push(filename.to_string());
        }
    }

    impl ServerForm for RecordingPage {
        fn snapshot(&self) -> FormPayload {
            self.form.lock().clone()
        }
    }

    #[derive(Default)]
    struct RecordingButton {
        history: Mutex<Vec<bool>>,
    }

    impl ActionButton for RecordingButton {
        fn set_enabled(&self, enabled: bool) {
            self.history.lock().push(enabled);
        }
    }

    struct Harness {
        page: Arc<RecordingPage>,
        start_button: Arc<RecordingButton>,
        stop_button: Arc<RecordingButton>,
        controller: Arc<Controller>,
    }

    impl Harness {
        fn new(backend: Arc<dyn Backend>) -> Self {
            let page = Arc::new(RecordingPage::default());
            let start_button = Arc::new(RecordingButton::default());
            let stop_button = Arc::new(RecordingButton::default());
            let bindings = Bindings {
                server_form: page.clone(),
                start_servers: start_button.clone(),
                stop_servers: stop_button.clone(),
                status: page.clone(),
                config_filename: page.clone(),
            };
            Self {
                page,
                start_button,
                stop_button,
                controller: Arc::new(Controller::new(backend, bindings)),
            }
        }

        fn status(&self) -> Option<StatusMessage> {
            self.page.status.lock().clone()
        }
    }

    #[tokio::test]
    async fn initialize_appends_one_option_per_file_in_order() {
        let backend = FakeBackend {
            files: Some(vec!["a.cfg".into(), "b.cfg".into()]),
            ..Default::default()
        };
        let h = Harness::new(Arc::new(backend));

        h.controller.initialize().await;

        assert_eq!(*h.page.options.lock(), ["a.cfg", "b.cfg"]);
        assert_eq!(h.status(), None);
    }

    #[tokio::test]
    async fn initialize_with_empty_list_adds_nothing() {
        let backend = FakeBackend {
            files: Some(Vec::new()),
            ..Default::default()
        };
        let h = Harness::new(Arc::new(backend));

        h.controller.initialize().await;

        assert!(h.page.options.lock().is_empty());
        assert_eq!(h.status(), None);
    }

    #[tokio::test]
    async fn initialize_failure_shows_loading_error() {
        let h = Harness::new(Arc::new(FakeBackend::default()));

        h.controller.initialize().await;

        assert!(h.page.options.lock().is_empty());
        let status = h.status().unwrap();
        assert_eq!(status.text, FILE_LIST_ERROR_MESSAGE);
        assert!(status.kind.css_class().contains("error"));
    }

    #[tokio::test]
    async fn start_success_shows_backend_message() {
        let backend = Arc::new(FakeBackend {
            start_reply: Some(ActionOutcome::Success("Servers started".into())),
            ..Default::default()
        });
        let h = Harness::new(backend.clone());
        *h.page.form.lock() = FormPayload::new()
            .with(FIELD_SERVER_IP, "192.168.1.1")
            .with(FIELD_CONFIG_FILENAME, "a.cfg");

        let dispatch = h.controller.start().await;

        assert_eq!(dispatch, Dispatch::Rendered(StatusMessage::success("Servers started")));
        assert_eq!(h.status().unwrap().kind.css_class(), "status");
        let submitted = backend.submitted.lock();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].get(FIELD_CONFIG_FILENAME), Some("a.cfg"));
    }

    #[tokio::test]
    async fn stop_failure_reply_is_shown_as_error() {
        let backend = FakeBackend {
            stop_reply: Some(ActionOutcome::Failure("No servers running".into())),
            ..Default::default()
        };
        let h = Harness::new(Arc::new(backend));

        h.controller.stop().await;

        let status = h.status().unwrap();
        assert_eq!(status.text, "No servers running");
        assert!(status.kind.is_error());
    }

    #[tokio::test]
    async fn malformed_reply_shows_generic_error() {
        let h = Harness::new(Arc::new(FakeBackend::default()));

        let dispatch = h.controller.start().await;

        assert_eq!(dispatch, Dispatch::Rendered(StatusMessage::error(GENERIC_ERROR_MESSAGE)));
        assert_eq!(h.status().unwrap().text, GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn unreachable_backend_shows_generic_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = HttpBackend::new(&format!("http://{addr}")).unwrap();
        let h = Harness::new(Arc::new(backend));

        h.controller.start().await;
        assert_eq!(h.status(), Some(StatusMessage::error(GENERIC_ERROR_MESSAGE)));

        h.controller.initialize().await;
        assert_eq!(h.status(), Some(StatusMessage::error(FILE_LIST_ERROR_MESSAGE)));
    }

    #[tokio::test]
    async fn button_is_disabled_while_request_is_pending() {
        let backend = FakeBackend {
            stop_reply: Some(ActionOutcome::Success("Servers stopped".into())),
            ..Default::default()
        };
        let h = Harness::new(Arc::new(backend));

        assert_eq!(h.controller.phase(ServerAction::Stop), ActionPhase::Idle);
        h.controller.stop().await;

        assert_eq!(*h.stop_button.history.lock(), [false, true]);
        assert!(h.start_button.history.lock().is_empty());
        assert_eq!(h.controller.phase(ServerAction::Stop), ActionPhase::Settled);
    }

    #[tokio::test]
    async fn click_while_pending_is_ignored() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            stop_reply: Some(ActionOutcome::Success("Servers stopped".into())),
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let h = Harness::new(Arc::new(backend));

        let controller = h.controller.clone();
        let first = tokio::spawn(async move { controller.stop().await });
        while h.controller.phase(ServerAction::Stop) != ActionPhase::Pending {
            tokio::task::yield_now().await;
        }

        assert_eq!(h.controller.stop().await, Dispatch::Ignored);
        assert_eq!(*h.stop_button.history.lock(), [false]);

        gate.notify_one();
        let dispatch = first.await.unwrap();
        assert_eq!(dispatch, Dispatch::Rendered(StatusMessage::success("Servers stopped")));
        assert_eq!(*h.stop_button.history.lock(), [false, true]);

        // settled again, so the next click goes through
        gate.notify_one();
        assert!(matches!(h.controller.stop().await, Dispatch::Rendered(_)));
    }

    #[tokio::test]
    async fn start_and_stop_do_not_block_each_other() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            start_reply: Some(ActionOutcome::Success("Servers started".into())),
            stop_reply: Some(ActionOutcome::Success("Servers stopped".into())),
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let h = Harness::new(Arc::new(backend));

        let controller = h.controller.clone();
        let stop = tokio::spawn(async move { controller.stop().await });
        while h.controller.phase(ServerAction::Stop) != ActionPhase::Pending {
            tokio::task::yield_now().await;
        }

        assert!(matches!(h.controller.start().await, Dispatch::Rendered(_)));
        assert_eq!(h.status().unwrap().text, "Servers started");

        gate.notify_one();
        stop.await.unwrap();
        // last write wins
        assert_eq!(h.status().unwrap().text, "Servers stopped");
    }
}
