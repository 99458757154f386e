//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values. All errors are
//! collected instead of stopping at the first one.

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("client.base_url {0:?} is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("server.host must not be empty")]
    EmptyHost,
}

/// Check a parsed configuration, returning every violation found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    match Url::parse(&config.client.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.client.base_url.clone())),
    }

    if config.client.timeout_secs == 0 {
        errors.push(ValidationError::ZeroLimit("client.timeout_secs"));
    }
    if config.limits.max_line_bytes == 0 {
        errors.push(ValidationError::ZeroLimit("limits.max_line_bytes"));
    }
    if config.limits.max_headers == 0 {
        errors.push(ValidationError::ZeroLimit("limits.max_headers"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroLimit("limits.max_body_bytes"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AppConfig::default();
        config.client.base_url = "ftp://example.com".into();
        config.limits.max_headers = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroLimit("limits.max_headers")));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = AppConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
