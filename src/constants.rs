//! Application constants and configuration

pub const APP_NAME: &str = "Netboot Console";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flask development server default
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const BACKEND_URL_ENV: &str = "NETBOOT_BACKEND_URL";

// Backend endpoints
pub const TFTP_FILES_PATH: &str = "/get_tftp_files";
pub const START_SERVERS_PATH: &str = "/start_servers";
pub const STOP_SERVERS_PATH: &str = "/stop_servers";

// Form field names expected by /start_servers
pub const FIELD_SERVER_IP: &str = "server_ip";
pub const FIELD_CLIENT_IP: &str = "client_ip";
pub const FIELD_CONFIG_FILENAME: &str = "config_filename";

pub const DEFAULT_SERVER_IP: &str = "192.168.1.1";
pub const DEFAULT_CLIENT_IP: &str = "192.168.1.10";
pub const DEFAULT_CONFIG_FILENAME: &str = "cisco-config.txt";

/// Only this exact value of the reply's `status` field counts as success
pub const SUCCESS_STATUS: &str = "success";

pub const FILE_LIST_ERROR_MESSAGE: &str = "Error loading TFTP files. Please try again.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

// Widget ids, named after the element ids of the web page this replaces
pub const SERVER_FORM_ID: &str = "server-form";
pub const START_BUTTON_ID: &str = "start-servers";
pub const STOP_BUTTON_ID: &str = "stop-servers";
pub const STATUS_ID: &str = "status";
pub const CONFIG_SELECT_ID: &str = "config-filename";
