//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub backend_url: String,

    // Last submitted form values
    pub server_ip: String,
    pub client_ip: String,
    pub config_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            server_ip: DEFAULT_SERVER_IP.to_string(),
            client_ip: DEFAULT_CLIENT_IP.to_string(),
            config_filename: DEFAULT_CONFIG_FILENAME.to_string(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Backend url for this session; the environment variable wins over the file.
    pub fn effective_backend_url(&self) -> String {
        self.backend_url_with_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    fn backend_url_with_override(&self, env_value: Option<String>) -> String {
        match env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(url) => {
                info!(url = %url, "Backend url overridden from environment");
                url
            }
            None => self.backend_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.backend_url, "http://127.0.0.1:5000");
        assert_eq!(settings.config_filename, "cisco-config.txt");
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_file_fills_remaining_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"backend_url": "http://10.0.0.5:8080", "client_ip": "10.0.0.20"}"#,
        )
        .unwrap();

        let settings = Settings::load(dir.path());
        assert_eq!(settings.backend_url, "http://10.0.0.5:8080");
        assert_eq!(settings.client_ip, "10.0.0.20");
        assert_eq!(settings.server_ip, DEFAULT_SERVER_IP);
        assert_eq!(settings.window_w, None);
    }

    #[test]
    fn saved_form_values_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            server_ip: "10.1.1.1".into(),
            config_filename: "switch-a.cfg".into(),
            window_w: Some(640.0),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let settings = Settings::default();
        assert_eq!(
            settings.backend_url_with_override(Some("http://boot-host:5000".into())),
            "http://boot-host:5000"
        );
        assert_eq!(settings.backend_url_with_override(Some("   ".into())), DEFAULT_BACKEND_URL);
        assert_eq!(settings.backend_url_with_override(None), DEFAULT_BACKEND_URL);
    }
}
