//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct
//! fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in
/// the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [credentials] section
    if let Some(section) = ini.section(Some("credentials")) {
        if let Some(v) = section.get("client_id") {
            let v = v.trim();
            if !v.is_empty() {
                config.credentials.client_id = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("client_secret") {
            let v = v.trim();
            if !v.is_empty() {
                config.credentials.client_secret = Some(v.to_string());
            }
        }
    }

    // [api] section
    if let Some(section) = ini.section(Some("api")) {
        if let Some(v) = section.get("token_url") {
            let v = v.trim();
            if !v.is_empty() {
                if !v.starts_with("http://") && !v.starts_with("https://") {
                    return Err(ConfigFileError::InvalidValue {
                        section: "api".to_string(),
                        key: "token_url".to_string(),
                        value: v.to_string(),
                        reason: "must be a URL starting with 'http://' or 'https://'".to_string(),
                    });
                }
                config.api.token_url = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout") {
            config.api.timeout = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "api".to_string(),
                key: "timeout".to_string(),
                value: v.to_string(),
                reason: "must be a positive integer (seconds)".to_string(),
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let ini = Ini::load_from_str(
            "[credentials]\n\
             client_id = my-id\n\
             client_secret = my-secret\n\
             [api]\n\
             token_url = https://token.example.test/oauth2/token\n\
             timeout = 10\n\
             [logging]\n\
             file = /tmp/kartlager.log\n",
        )
        .unwrap();

        let config = parse_ini(&ini).unwrap();
        assert_eq!(config.credentials.client_id.as_deref(), Some("my-id"));
        assert_eq!(config.credentials.client_secret.as_deref(), Some("my-secret"));
        assert_eq!(config.api.token_url, "https://token.example.test/oauth2/token");
        assert_eq!(config.api.timeout, 10);
        assert_eq!(config.logging.file, PathBuf::from("/tmp/kartlager.log"));
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let ini = Ini::load_from_str("").unwrap();
        let config = parse_ini(&ini).unwrap();
        assert!(config.credentials.client_id.is_none());
        assert_eq!(config.api.timeout, super::super::DEFAULT_API_TIMEOUT_SECS);
    }

    #[test]
    fn test_blank_credentials_are_none() {
        let ini = Ini::load_from_str("[credentials]\nclient_id =  \n").unwrap();
        let config = parse_ini(&ini).unwrap();
        assert!(config.credentials.client_id.is_none());
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let ini = Ini::load_from_str("[api]\ntimeout = soon\n").unwrap();
        assert!(matches!(
            parse_ini(&ini),
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_invalid_token_url_is_rejected() {
        let ini = Ini::load_from_str("[api]\ntoken_url = not-a-url\n").unwrap();
        assert!(matches!(
            parse_ini(&ini),
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }
}
