//! Default values and well-known paths for configuration.

use std::path::PathBuf;

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://apimanager.lantmateriet.se/oauth2/token";

/// Default HTTP timeout, seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the configured client id.
pub const ENV_CLIENT_ID: &str = "KARTLAGER_CLIENT_ID";

/// Environment variable overriding the configured client secret.
pub const ENV_CLIENT_SECRET: &str = "KARTLAGER_CLIENT_SECRET";

/// Get the path to the config directory (~/.kartlager).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kartlager")
}

/// Get the path to the config file (~/.kartlager/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

/// Get the default log file path (~/.kartlager/kartlager.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join("kartlager.log")
}
