//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every section falls back to its `Default` so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Toy server settings (bind address, timeouts).
    pub server: ServerConfig,

    /// Client examples settings (remote API, headers).
    pub client: ClientConfig,

    /// Request parsing limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host or IP to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on. 0 picks an ephemeral port.
    pub port: u16,

    /// Per-connection read timeout in seconds. 0 disables the timeout.
    pub read_timeout_secs: u64,
}

impl ServerConfig {
    /// The `host:port` string handed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            read_timeout_secs: 30,
        }
    }
}

/// Client examples configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the remote users API.
    pub base_url: String,

    /// User-Agent sent by the GET example.
    pub user_agent: String,

    /// Total timeout per request in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

/// Limits applied while reading a request off the socket.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum length of the request line or of a single header line, in bytes.
    pub max_line_bytes: usize,

    /// Maximum number of header lines.
    pub max_headers: usize,

    /// Maximum declared Content-Length.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 8 * 1024,
            max_headers: 100,
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.client.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.limits.max_headers, 100);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [limits]
            max_body_bytes = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.read_timeout_secs, 30);
        assert_eq!(config.limits.max_body_bytes, 16);
        assert_eq!(config.limits.max_line_bytes, 8192);
    }
}
