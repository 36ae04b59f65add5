//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use kartlager::api::ApiError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(String),
    /// Invalid or missing command-line arguments
    InvalidArguments(String),
    /// An API operation failed
    Api(ApiError),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
    /// Failed to initialize logging
    LoggingInit(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::Api(ApiError::Configuration(_)) = self {
            eprintln!();
            eprintln!("Credentials can be provided via:");
            eprintln!("  kartlager config set credentials.client_id <id>");
            eprintln!("  kartlager config set credentials.client_secret <secret>");
            eprintln!("or the KARTLAGER_CLIENT_ID / KARTLAGER_CLIENT_SECRET environment variables.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::Api(e) => write!(f, "{}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Api(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}
