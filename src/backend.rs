//! HTTP access to the provisioning backend
//!
//! The backend answers every call with JSON. Replies are decoded from the raw
//! body whatever the HTTP status code is, so a `400` carrying
//! `{"status": "error", "message": ...}` is rendered from its body like any
//! other reply.

use crate::constants::*;
use crate::types::{ActionOutcome, FormPayload};
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Operations the page performs against the backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Filenames available in the backend's TFTP directory, in backend order
    async fn list_tftp_files(&self) -> BackendResult<Vec<String>>;

    async fn start_servers(&self, form: &FormPayload) -> BackendResult<ActionOutcome>;

    async fn stop_servers(&self) -> BackendResult<ActionOutcome>;
}

/// reqwest-backed implementation rooted at the backend's origin
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> BackendResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not an http origin".to_string(),
            });
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint paths are absolute, so they replace any path on the base url
    fn endpoint(&self, path: &str) -> BackendResult<Url> {
        self.base_url.join(path).map_err(|e| BackendError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            reason: e.to_string(),
        })
    }

    async fn read_outcome(response: reqwest::Response) -> BackendResult<ActionOutcome> {
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "Backend replied");
        decode_outcome(&body)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_tftp_files(&self) -> BackendResult<Vec<String>> {
        let url = self.endpoint(TFTP_FILES_PATH)?;
        debug!(%url, "Fetching TFTP file list");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "Backend replied");
        decode_file_list(&body)
    }

    async fn start_servers(&self, form: &FormPayload) -> BackendResult<ActionOutcome> {
        let url = self.endpoint(START_SERVERS_PATH)?;
        let multipart = form
            .fields()
            .iter()
            .fold(Form::new(), |acc, (name, value)| acc.text(name.clone(), value.clone()));
        debug!(%url, fields = form.len(), "Posting server form");
        let response = self.client.post(url).multipart(multipart).send().await?;
        Self::read_outcome(response).await
    }

    async fn stop_servers(&self) -> BackendResult<ActionOutcome> {
        let url = self.endpoint(STOP_SERVERS_PATH)?;
        debug!(%url, "Posting stop request");
        let response = self.client.post(url).send().await?;
        Self::read_outcome(response).await
    }
}

/// Decode the `/get_tftp_files` body: a JSON array of filename strings.
pub fn decode_file_list(body: &[u8]) -> BackendResult<Vec<String>> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a start/stop reply. Any well-formed JSON is accepted here; the
/// success/failure split is made by [`ActionOutcome::from_reply`].
pub fn decode_outcome(body: &[u8]) -> BackendResult<ActionOutcome> {
    let reply: Value = serde_json::from_slice(body)?;
    Ok(ActionOutcome::from_reply(&reply))
}
