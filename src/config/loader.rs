//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_document() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [client]
            base_url = "http://localhost:9999"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:4000");
        assert_eq!(config.client.base_url, "http://localhost:9999");
    }

    #[test]
    fn reports_syntax_errors() {
        let err = parse_config("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reports_validation_errors() {
        let err = parse_config("[limits]\nmax_body_bytes = 0\nmax_headers = 0").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        let message = parse_config("[limits]\nmax_headers = 0").unwrap_err().to_string();
        assert_eq!(
            message,
            "Validation failed: limits.max_headers must be greater than zero"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
