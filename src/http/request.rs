//! Request parsing.
//!
//! # Responsibilities
//! - Read one request line, the header block and an optional body
//!   off a buffered stream
//! - Enforce line length, header count and body size limits
//!
//! # Design Decisions
//! - Header keys are kept exactly as received (case-sensitive lookups)
//! - Header lines without `": "` are skipped, not rejected
//! - The body exists only when `Content-Length` is present and numeric
//! - No chunked bodies, no keep-alive: one request per connection

use std::collections::HashMap;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::config::LimitsConfig;

/// Header that announces the body length.
pub const CONTENT_LENGTH: &str = "Content-Length";

const HEADER_SEPARATOR: &str = ": ";

/// Errors produced while reading a request.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request line {0:?}")]
    MalformedRequestLine(String),

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("more than {limit} header lines")]
    TooManyHeaders { limit: usize },

    #[error("declared body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },

    #[error("connection closed after {received} of {expected} body bytes")]
    IncompleteBody { expected: usize, received: usize },
}

impl ParseError {
    /// Whether the peer sent something we can answer with a 400.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ParseError::Io(_) | ParseError::IncompleteBody { .. })
    }
}

/// One request as read off the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: String,
    pub path: String,
    /// Protocol version token; parsed but not interpreted.
    pub version: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl ParsedRequest {
    /// Exact-key header lookup.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// Reads requests according to the configured limits.
#[derive(Debug, Clone, Default)]
pub struct RequestParser {
    limits: LimitsConfig,
}

impl RequestParser {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Parse a single request.
    ///
    /// Returns `Ok(None)` when the stream ends before a request line.
    pub async fn parse<R>(&self, reader: &mut R) -> Result<Option<ParsedRequest>, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let max_line = self.limits.max_line_bytes;

        let Some(request_line) = read_line(reader, max_line).await? else {
            return Ok(None);
        };

        let mut parts = request_line.split_whitespace();
        let (method, path) = match (parts.next(), parts.next()) {
            (Some(method), Some(path)) => (method.to_string(), path.to_string()),
            _ => return Err(ParseError::MalformedRequestLine(request_line)),
        };
        let version = parts.next().map(str::to_string);

        let headers = self.read_headers(reader).await?;
        let body = self.read_body(reader, &headers).await?;

        Ok(Some(ParsedRequest {
            method,
            path,
            version,
            headers,
            body,
        }))
    }

    async fn read_headers<R>(&self, reader: &mut R) -> Result<HashMap<String, String>, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut headers = HashMap::new();
        let mut count = 0usize;

        while let Some(line) = read_line(reader, self.limits.max_line_bytes).await? {
            if line.is_empty() {
                break;
            }
            count += 1;
            if count > self.limits.max_headers {
                return Err(ParseError::TooManyHeaders {
                    limit: self.limits.max_headers,
                });
            }
            match line.split_once(HEADER_SEPARATOR) {
                Some((key, value)) => {
                    headers.insert(key.to_string(), value.trim_end().to_string());
                }
                None => tracing::trace!(line = %line, "Skipping malformed header line"),
            }
        }

        Ok(headers)
    }

    async fn read_body<R>(
        &self,
        reader: &mut R,
        headers: &HashMap<String, String>,
    ) -> Result<Option<Vec<u8>>, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let Some(length) = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.trim().parse::<usize>().ok())
        else {
            return Ok(None);
        };

        if length > self.limits.max_body_bytes {
            return Err(ParseError::BodyTooLarge {
                length,
                limit: self.limits.max_body_bytes,
            });
        }

        let mut body = Vec::with_capacity(length);
        let received = (&mut *reader)
            .take(length as u64)
            .read_to_end(&mut body)
            .await?;
        if received < length {
            return Err(ParseError::IncompleteBody {
                expected: length,
                received,
            });
        }

        Ok(Some(body))
    }
}

/// Read one line, without its CRLF (or bare LF) terminator.
///
/// `Ok(None)` means end of stream.
async fn read_line<R>(reader: &mut R, max: usize) -> Result<Option<String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    // Room for the content plus "\r\n"
    let n = (&mut *reader)
        .take(max as u64 + 2)
        .read_until(b'\n', &mut buf)
        .await?;
    if n == 0 {
        return Ok(None);
    }

    let line = strip_line_ending(&buf);
    if line.len() > max {
        return Err(ParseError::LineTooLong { limit: max });
    }
    Ok(Some(String::from_utf8_lossy(line).into_owned()))
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
