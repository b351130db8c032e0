//! Page state shared between the UI thread and request tasks, and the
//! controller bindings implemented on top of it.

use crate::constants::*;
use crate::controller::{ActionButton, Bindings, FileSelector, ServerForm, StatusLine};
use crate::settings::Settings;
use crate::types::{FormPayload, ServerAction, StatusMessage};
use eframe::egui;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tracing::debug;

pub struct PageState {
    pub server_ip: String,
    pub client_ip: String,
    pub config_options: Vec<String>,
    /// Remembered choice, submitted only while it is one of the options
    pub config_filename: String,
    pub status: Option<StatusMessage>,
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl PageState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            server_ip: settings.server_ip.clone(),
            client_ip: settings.client_ip.clone(),
            config_options: Vec::new(),
            config_filename: settings.config_filename.clone(),
            status: None,
            start_enabled: true,
            stop_enabled: true,
        }
    }

    /// Option the selector shows as chosen: the remembered filename when the
    /// backend offers it, otherwise the first option.
    pub fn selected_filename(&self) -> Option<&str> {
        self.config_options
            .iter()
            .find(|option| **option == self.config_filename)
            .or_else(|| self.config_options.first())
            .map(String::as_str)
    }

    pub fn form_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new()
            .with(FIELD_SERVER_IP, &self.server_ip)
            .with(FIELD_CLIENT_IP, &self.client_ip);
        // an empty selector contributes no field
        if let Some(filename) = self.selected_filename() {
            payload.push(FIELD_CONFIG_FILENAME, filename);
        }
        payload
    }
}

/// Cloneable handle to the page; every write requests a repaint.
#[derive(Clone)]
pub struct PageHandle {
    state: Arc<Mutex<PageState>>,
    ctx: egui::Context,
}

impl PageHandle {
    pub fn new(state: PageState, ctx: egui::Context) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            ctx,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock()
    }

    pub fn bindings(&self) -> Bindings {
        Bindings {
            server_form: Arc::new(self.clone()),
            start_servers: Arc::new(ButtonHandle {
                page: self.clone(),
                action: ServerAction::Start,
            }),
            stop_servers: Arc::new(ButtonHandle {
                page: self.clone(),
                action: ServerAction::Stop,
            }),
            status: Arc::new(self.clone()),
            config_filename: Arc::new(self.clone()),
        }
    }

    fn update(&self, f: impl FnOnce(&mut PageState)) {
        f(&mut *self.state.lock());
        self.ctx.request_repaint();
    }
}

impl StatusLine for PageHandle {
    fn show(&self, status: &StatusMessage) {
        debug!(class = status.kind.css_class(), text = %status.text, "Status line updated");
        self.update(|page| page.status = Some(status.clone()));
    }
}

impl FileSelector for PageHandle {
    fn append_option(&self, filename: &str) {
        self.update(|page| page.config_options.push(filename.to_string()));
    }
}

impl ServerForm for PageHandle {
    fn snapshot(&self) -> FormPayload {
        self.state.lock().form_payload()
    }
}

struct ButtonHandle {
    page: PageHandle,
    action: ServerAction,
}

impl ActionButton for ButtonHandle {
    fn set_enabled(&self, enabled: bool) {
        let action = self.action;
        self.page.update(|page| match action {
            ServerAction::Start => page.start_enabled = enabled,
            ServerAction::Stop => page.stop_enabled = enabled,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageHandle {
        PageHandle::new(PageState::from_settings(&Settings::default()), egui::Context::default())
    }

    #[test]
    fn selection_prefers_remembered_filename() {
        let page = page();
        let bindings = page.bindings();
        for file in ["a.cfg", DEFAULT_CONFIG_FILENAME, "b.cfg"] {
            bindings.config_filename.append_option(file);
        }
        assert_eq!(page.lock().selected_filename(), Some(DEFAULT_CONFIG_FILENAME));
    }

    #[test]
    fn selection_falls_back_to_first_option() {
        let page = page();
        let bindings = page.bindings();
        bindings.config_filename.append_option("a.cfg");
        bindings.config_filename.append_option("b.cfg");
        assert_eq!(page.lock().selected_filename(), Some("a.cfg"));
        assert_eq!(page.lock().config_options, ["a.cfg", "b.cfg"]);
    }

    #[test]
    fn snapshot_reads_current_values() {
        let page = page();
        let bindings = page.bindings();
        bindings.config_filename.append_option("b.cfg");
        page.lock().server_ip = "10.0.0.1".into();

        let payload = bindings.server_form.snapshot();
        assert_eq!(payload.get(FIELD_SERVER_IP), Some("10.0.0.1"));
        assert_eq!(payload.get(FIELD_CLIENT_IP), Some(DEFAULT_CLIENT_IP));
        assert_eq!(payload.get(FIELD_CONFIG_FILENAME), Some("b.cfg"));
    }

    #[test]
    fn empty_selector_is_left_out_of_payload() {
        let payload = page().bindings().server_form.snapshot();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get(FIELD_CONFIG_FILENAME), None);
    }

    #[test]
    fn buttons_toggle_their_own_flag() {
        let page = page();
        let bindings = page.bindings();
        bindings.stop_servers.set_enabled(false);
        {
            let state = page.lock();
            assert!(state.start_enabled);
            assert!(!state.stop_enabled);
        }
        bindings.stop_servers.set_enabled(true);
        bindings.start_servers.set_enabled(false);
        let state = page.lock();
        assert!(!state.start_enabled);
        assert!(state.stop_enabled);
    }

    #[test]
    fn status_replaces_previous_message() {
        let page = page();
        let bindings = page.bindings();
        bindings.status.show(&StatusMessage::error(GENERIC_ERROR_MESSAGE));
        bindings.status.show(&StatusMessage::success("Servers started"));
        assert_eq!(page.lock().status, Some(StatusMessage::success("Servers started")));
    }
}
