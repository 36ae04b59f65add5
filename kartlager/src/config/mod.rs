//! Configuration handling for ~/.kartlager/config.ini.
//!
//! Settings structs in [`settings`], defaults and well-known paths in
//! [`defaults`], load/save in [`file`], INI mapping in [`parser`] and
//! [`writer`], and the typed key get/set surface in [`keys`].

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    config_directory, config_file_path, default_log_file, DEFAULT_API_TIMEOUT_SECS,
    DEFAULT_TOKEN_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET,
};
pub use file::ConfigFileError;
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ApiSettings, ConfigFile, CredentialSettings, LoggingSettings};
