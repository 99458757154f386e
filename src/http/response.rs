//! Response building.
//!
//! # Responsibilities
//! - Hold a status code and an optional JSON body
//! - Serialize to raw HTTP/1.1 bytes with the fixed header set
//!
//! # Design Decisions
//! - Content-Length counts bytes of the serialized body, not characters
//! - Every response closes the connection

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

/// `Date` header format (IMF-fixdate).
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A JSON response waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl JsonResponse {
    /// A response carrying `body` serialized as JSON.
    ///
    /// Values that fail to serialize become a 500 with an error body.
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                body: Some(value),
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: Some(json!({ "error": message })),
        }
    }

    /// A response with no body at all.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// Reason phrase for the status line.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    /// The pretty-printed body, or the empty string.
    pub fn body_text(&self) -> String {
        match &self.body {
            Some(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Serialize using the current time for the `Date` header.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_at(Utc::now())
    }

    /// Serialize with an explicit `Date`.
    pub fn to_bytes_at(&self, now: DateTime<Utc>) -> Vec<u8> {
        let body = self.body_text();
        let mut out = format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             Date: {}\r\n\
             \r\n",
            self.status.as_u16(),
            self.reason(),
            body.len(),
            http_date(now),
        );
        out.push_str(&body);
        out.into_bytes()
    }
}

/// Format a timestamp the way the `Date` header expects.
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format(HTTP_DATE_FORMAT).to_string()
}
