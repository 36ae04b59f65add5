//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use super::defaults::{default_log_file, DEFAULT_API_TIMEOUT_SECS, DEFAULT_TOKEN_URL};
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    /// API credentials
    pub credentials: CredentialSettings,
    /// API endpoint settings
    pub api: ApiSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// OAuth2 client credentials for the API manager.
///
/// Both values may also come from the environment, which takes precedence
/// over the file (see [`ConfigFile::credentials`](super::ConfigFile)).
#[derive(Debug, Clone, Default)]
pub struct CredentialSettings {
    /// OAuth2 client id
    pub client_id: Option<String>,
    /// OAuth2 client secret
    pub client_secret: Option<String>,
}

/// API endpoint configuration.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// OAuth2 token endpoint URL
    pub token_url: String,
    /// Timeout in seconds for HTTP requests
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}
