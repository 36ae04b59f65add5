//! Configuration key access and validation.
//!
//! Provides a type-safe interface for getting and setting configuration
//! values by key name, with validation via the Specification Pattern.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::parser::expand_tilde;
use super::settings::ConfigFile;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // Credential settings
    CredentialsClientId,
    CredentialsClientSecret,

    // API settings
    ApiTokenUrl,
    ApiTimeout,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credentials.client_id" => Ok(ConfigKey::CredentialsClientId),
            "credentials.client_secret" => Ok(ConfigKey::CredentialsClientSecret),

            "api.token_url" => Ok(ConfigKey::ApiTokenUrl),
            "api.timeout" => Ok(ConfigKey::ApiTimeout),

            "logging.file" => Ok(ConfigKey::LoggingFile),

            _ => Err(ConfigKeyError::UnknownKey(s.to_string())),
        }
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "credentials.client_id").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::CredentialsClientId => "credentials.client_id",
            ConfigKey::CredentialsClientSecret => "credentials.client_secret",
            ConfigKey::ApiTokenUrl => "api.token_url",
            ConfigKey::ApiTimeout => "api.timeout",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "credentials").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::CredentialsClientId => {
                config.credentials.client_id.clone().unwrap_or_default()
            }
            ConfigKey::CredentialsClientSecret => {
                config.credentials.client_secret.clone().unwrap_or_default()
            }
            ConfigKey::ApiTokenUrl => config.api.token_url.clone(),
            ConfigKey::ApiTimeout => config.api.timeout.to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before
    /// setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        self.set_unchecked(config, value);
        Ok(())
    }

    /// Set the value without validation. Use `set()` for validated setting.
    fn set_unchecked(&self, config: &mut ConfigFile, value: &str) {
        match self {
            ConfigKey::CredentialsClientId => {
                config.credentials.client_id = optional_string(value);
            }
            ConfigKey::CredentialsClientSecret => {
                config.credentials.client_secret = optional_string(value);
            }
            ConfigKey::ApiTokenUrl => {
                config.api.token_url = value.to_string();
            }
            ConfigKey::ApiTimeout => {
                // Validation ensures this won't panic
                config.api.timeout = value.parse().unwrap();
            }
            ConfigKey::LoggingFile => {
                config.logging.file = expand_tilde(value);
            }
        }
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value)
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::CredentialsClientId => Box::new(AnyStringSpec),
            ConfigKey::CredentialsClientSecret => Box::new(AnyStringSpec),
            ConfigKey::ApiTokenUrl => Box::new(UrlSpec),
            ConfigKey::ApiTimeout => Box::new(PositiveIntegerSpec),
            ConfigKey::LoggingFile => Box::new(PathSpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::CredentialsClientId,
            ConfigKey::CredentialsClientSecret,
            ConfigKey::ApiTokenUrl,
            ConfigKey::ApiTimeout,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Check if the value satisfies this specification.
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification that accepts any string value.
struct AnyStringSpec;

impl ValueSpecification for AnyStringSpec {
    fn is_satisfied_by(&self, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Specification for URL values.
struct UrlSpec;

impl ValueSpecification for UrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err("must be a URL starting with 'http://' or 'https://'".to_string())
        }
    }
}

/// Specification for positive integer values.
struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| "must be a positive integer".to_string())
    }
}

/// Specification for path values (non-empty).
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert path to display string, collapsing home dir to ~.
fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

/// Convert empty string to None, non-empty to Some.
fn optional_string(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "credentials.client_id".parse::<ConfigKey>().unwrap(),
            ConfigKey::CredentialsClientId
        );
        assert_eq!(
            "api.token_url".parse::<ConfigKey>().unwrap(),
            ConfigKey::ApiTokenUrl
        );
        // Case insensitive
        assert_eq!(
            "API.TIMEOUT".parse::<ConfigKey>().unwrap(),
            ConfigKey::ApiTimeout
        );
        assert!("invalid.key".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_key_sections() {
        assert_eq!(ConfigKey::CredentialsClientId.section(), "credentials");
        assert_eq!(ConfigKey::ApiTimeout.section(), "api");
        assert_eq!(ConfigKey::LoggingFile.section(), "logging");
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::CredentialsClientId.get(&config), "");
        assert_eq!(ConfigKey::ApiTimeout.get(&config), "30");
        assert!(ConfigKey::ApiTokenUrl.get(&config).starts_with("https://"));
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::CredentialsClientId
            .set(&mut config, "my-id")
            .unwrap();
        assert_eq!(config.credentials.client_id.as_deref(), Some("my-id"));

        ConfigKey::ApiTimeout.set(&mut config, "60").unwrap();
        assert_eq!(config.api.timeout, 60);
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut config = ConfigFile::default();

        assert!(ConfigKey::ApiTimeout.set(&mut config, "abc").is_err());
        assert!(ConfigKey::ApiTokenUrl.set(&mut config, "not-a-url").is_err());

        // Config should be unchanged
        assert_eq!(config.api.timeout, 30);
    }

    #[test]
    fn test_clear_optional_value() {
        let mut config = ConfigFile::default();

        ConfigKey::CredentialsClientId
            .set(&mut config, "my-id")
            .unwrap();
        assert!(config.credentials.client_id.is_some());

        ConfigKey::CredentialsClientId.set(&mut config, "").unwrap();
        assert!(config.credentials.client_id.is_none());
    }

    #[test]
    fn test_all_keys_roundtrip_through_from_str() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }
}
