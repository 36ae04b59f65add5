//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let client_id = config.credentials.client_id.as_deref().unwrap_or("");
    let client_secret = config.credentials.client_secret.as_deref().unwrap_or("");

    format!(
        r#"[credentials]
; OAuth2 client credentials for the API manager.
; Register an application at https://apimanager.lantmateriet.se to get these.
; The KARTLAGER_CLIENT_ID / KARTLAGER_CLIENT_SECRET environment variables
; take precedence over the values here.
client_id = {}
client_secret = {}

[api]
; OAuth2 token endpoint
token_url = {}
; Timeout in seconds for HTTP requests (default: 30)
timeout = {}

[logging]
; Log file path
file = {}
"#,
        client_id,
        client_secret,
        config.api.token_url,
        config.api.timeout,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to a string for INI output, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_parser() {
        let mut config = ConfigFile::default();
        config.credentials.client_id = Some("my-id".to_string());
        config.credentials.client_secret = Some("my-secret".to_string());
        config.api.timeout = 12;

        let text = to_config_string(&config);
        let ini = ini::Ini::load_from_str(&text).unwrap();
        let parsed = super::super::parser::parse_ini(&ini).unwrap();

        assert_eq!(parsed.credentials.client_id.as_deref(), Some("my-id"));
        assert_eq!(parsed.credentials.client_secret.as_deref(), Some("my-secret"));
        assert_eq!(parsed.api.timeout, 12);
        assert_eq!(parsed.api.token_url, config.api.token_url);
    }

    #[test]
    fn test_empty_credentials_serialize_as_blank() {
        let text = to_config_string(&ConfigFile::default());
        assert!(text.contains("client_id = \n"));
        assert!(text.contains("client_secret = \n"));
    }
}
