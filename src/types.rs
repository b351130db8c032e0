//! Common types and data structures

use crate::constants::*;
use serde_json::Value;

/// Visual kind of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// Class name the web page used for this kind
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Success => "status",
            StatusKind::Error => "status error",
        }
    }

    pub fn is_error(self) -> bool {
        self == StatusKind::Error
    }
}

/// Text shown in the status line together with its styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Result the backend reports for a start/stop request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success(String),
    Failure(String),
}

impl ActionOutcome {
    /// Interpret a decoded `{message, status}` reply.
    ///
    /// Anything other than a string `status` equal to `"success"` is a failure,
    /// including a missing field or a reply that is not an object at all.
    pub fn from_reply(reply: &Value) -> Self {
        let message = match reply.get("message") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        match reply.get("status").and_then(Value::as_str) {
            Some(SUCCESS_STATUS) => ActionOutcome::Success(message),
            _ => ActionOutcome::Failure(message),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ActionOutcome::Success(m) | ActionOutcome::Failure(m) => m,
        }
    }

    pub fn into_status(self) -> StatusMessage {
        match self {
            ActionOutcome::Success(m) => StatusMessage::success(m),
            ActionOutcome::Failure(m) => StatusMessage::error(m),
        }
    }
}

/// Ordered name/value pairs of the server form, sent as multipart fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Lifecycle of a single button-triggered request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    #[default]
    Idle,
    Pending,
    Settled,
}

/// The two server actions the page can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAction {
    Start,
    Stop,
}

impl ServerAction {
    pub fn endpoint(self) -> &'static str {
        match self {
            ServerAction::Start => START_SERVERS_PATH,
            ServerAction::Stop => STOP_SERVERS_PATH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServerAction::Start => "start",
            ServerAction::Stop => "stop",
        }
    }
}
